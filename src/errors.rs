use thiserror::Error;

#[derive(Debug, Error)]
pub enum MethodError {
    #[error("invalid params: {message}")]
    InvalidParams {
        code: &'static str,
        message: String,
    },
    #[error("internal error: {message}")]
    Internal { code: &'static str, message: String },
}

impl MethodError {
    pub fn invalid_params(code: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to read from the request stream")]
    Read(#[source] std::io::Error),
    #[error("failed to write to the response stream")]
    Write(#[source] std::io::Error),
    #[error("response writer task terminated abnormally")]
    SinkTask(#[source] tokio::task::JoinError),
}
