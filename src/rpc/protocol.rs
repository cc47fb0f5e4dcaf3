//! JSON-RPC protocol representations and formatting utilities
//!
//! Provides standardized mapping of method faults to valid JSON-RPC payloads.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::MethodError;

#[derive(Debug, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

pub fn is_json_rpc_error(value: &Value) -> bool {
    value.get("error").is_some()
}

pub fn method_error_to_json_rpc(id: Option<Value>, err: MethodError) -> Value {
    match err {
        MethodError::InvalidParams { code, message } => json_rpc_error_with_data(
            id,
            -32602,
            "Invalid params",
            Some(json!({
                "code": code,
                "message": message,
                "details": {}
            })),
        ),
        MethodError::Internal { message, .. } => {
            tracing::error!(error = %message, "method failed with internal error");
            json_rpc_error(id, -32603, "Internal error")
        }
    }
}

pub fn json_rpc_error(id: Option<Value>, code: i32, message: &str) -> Value {
    json_rpc_error_with_data(id, code, message, None)
}

pub fn json_rpc_error_with_data(
    id: Option<Value>,
    code: i32,
    message: &str,
    data: Option<Value>,
) -> Value {
    let mut error = json!({
        "code": code,
        "message": message
    });
    if let Some(data) = data {
        error["data"] = data;
    }

    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error
    })
}

pub fn json_rpc_result(id: Option<Value>, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn formats_error_without_data() {
        let response = json_rpc_error(Some(json!(7)), -32601, "Method not found");

        assert_eq!(
            response,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "error": {
                    "code": -32601,
                    "message": "Method not found"
                }
            })
        );
    }

    #[test]
    fn missing_id_serializes_as_null() {
        let response = json_rpc_error(None, -32700, "Parse error");
        assert_eq!(response["id"], Value::Null);
    }

    #[test]
    fn invalid_params_carries_structured_data() {
        let err = MethodError::invalid_params("invalid_arguments", "two numbers required");
        let response = method_error_to_json_rpc(Some(json!(1)), err);

        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["data"]["code"], "invalid_arguments");
        assert_eq!(
            response["error"]["data"]["message"],
            "two numbers required"
        );
    }

    #[test]
    fn internal_error_detail_stays_off_the_wire() {
        let err = MethodError::internal("dbus exploded at offset 42");
        let response = method_error_to_json_rpc(Some(json!(1)), err);

        assert_eq!(response["error"]["code"], -32603);
        assert_eq!(response["error"]["message"], "Internal error");
        assert!(response["error"].get("data").is_none());
    }

    #[test]
    fn result_keeps_request_id() {
        let response = json_rpc_result(Some(json!("abc")), json!({"ok": true}));

        assert_eq!(response["jsonrpc"], "2.0");
        assert_eq!(response["id"], "abc");
        assert_eq!(response["result"]["ok"], true);
    }
}
