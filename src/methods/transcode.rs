//! Base64/JSON payload transcoding
//!
//! Methods that declare transport encoding receive their arguments as a single
//! base64 string holding a JSON array, and return a base64 string holding the
//! JSON-encoded result. `Transcoded` wraps exactly those methods at registry
//! construction; everything else stays plain JSON.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::errors::MethodError;
use crate::rpc::registry::Method;

pub struct Transcoded<M> {
    inner: M,
}

impl<M> Transcoded<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<M: Method> Method for Transcoded<M> {
    async fn call(&self, params: Value) -> Result<Value, MethodError> {
        let decoded = decode_params(&params)?;
        let result = self.inner.call(decoded).await?;
        encode_result(&result)
    }
}

fn decode_params(params: &Value) -> Result<Value, MethodError> {
    let encoded = params
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .ok_or_else(|| {
            MethodError::invalid_params(
                "invalid_payload",
                "expected a single base64 string argument",
            )
        })?;

    let bytes = STANDARD.decode(encoded.trim()).map_err(|_| {
        MethodError::invalid_params("invalid_payload", "argument payload is not valid base64")
    })?;

    serde_json::from_slice(&bytes).map_err(|_| {
        MethodError::invalid_params(
            "invalid_payload",
            "decoded argument payload is not valid JSON",
        )
    })
}

fn encode_result(result: &Value) -> Result<Value, MethodError> {
    let bytes = serde_json::to_vec(result)
        .map_err(|err| MethodError::internal(format!("failed to encode result payload: {err}")))?;
    Ok(Value::String(STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Sum;

    #[async_trait]
    impl Method for Sum {
        async fn call(&self, params: Value) -> Result<Value, MethodError> {
            let args: Vec<f64> = serde_json::from_value(params)
                .map_err(|_| MethodError::invalid_params("invalid_arguments", "numbers only"))?;
            Ok(json!(args.iter().sum::<f64>()))
        }
    }

    fn encode_args(args: &Value) -> Value {
        json!([STANDARD.encode(serde_json::to_vec(args).expect("args serialization"))])
    }

    #[tokio::test]
    async fn decodes_arguments_and_encodes_result() {
        let wrapped = Transcoded::new(Sum);

        let result = wrapped
            .call(encode_args(&json!([1, 2, 3])))
            .await
            .expect("transcoded call");

        let encoded = result.as_str().expect("base64 string result");
        let bytes = STANDARD.decode(encoded).expect("valid base64");
        let decoded: Value = serde_json::from_slice(&bytes).expect("valid json payload");
        assert_eq!(decoded, json!(6.0));
    }

    #[tokio::test]
    async fn rejects_missing_argument() {
        let wrapped = Transcoded::new(Sum);

        let err = wrapped.call(json!([])).await.expect_err("expected rejection");
        assert!(matches!(err, MethodError::InvalidParams { .. }));
    }

    #[tokio::test]
    async fn rejects_invalid_base64() {
        let wrapped = Transcoded::new(Sum);

        let err = wrapped
            .call(json!(["not base64!!!"]))
            .await
            .expect_err("expected rejection");
        assert!(matches!(err, MethodError::InvalidParams { .. }));
    }

    #[tokio::test]
    async fn rejects_payload_that_is_not_json() {
        let wrapped = Transcoded::new(Sum);

        let err = wrapped
            .call(json!([STANDARD.encode(b"{{{{")]))
            .await
            .expect_err("expected rejection");
        assert!(matches!(err, MethodError::InvalidParams { .. }));
    }

    #[tokio::test]
    async fn inner_errors_pass_through_undisturbed() {
        let wrapped = Transcoded::new(Sum);

        let err = wrapped
            .call(encode_args(&json!(["strings", "not", "numbers"])))
            .await
            .expect_err("expected inner rejection");
        assert!(matches!(
            err,
            MethodError::InvalidParams {
                code: "invalid_arguments",
                ..
            }
        ));
    }
}
