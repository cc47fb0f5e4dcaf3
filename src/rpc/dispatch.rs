//! Per-line JSON-RPC dispatch
//!
//! Decodes one request line, routes it through the handler registry, and
//! renders exactly one single-line response. Per-request faults become
//! protocol-level error responses; they never escape the dispatcher.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::rpc::protocol::{
    is_json_rpc_error, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
    method_error_to_json_rpc, Request,
};
use crate::rpc::registry::HandlerRegistry;

pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Produce the response line for one request line.
    pub async fn dispatch(&self, line: &str) -> String {
        let response = self.handle_request_line(line).await;
        serde_json::to_string(&response).expect("jsonrpc response serialization")
    }

    async fn handle_request_line(&self, line: &str) -> Value {
        let payload: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => return json_rpc_error(None, -32700, "Parse error"),
        };

        let request_id = payload.get("id").cloned();
        let parsed: Request = match serde_json::from_value(payload) {
            Ok(request) => request,
            Err(_) => return json_rpc_error(request_id, -32600, "Invalid Request"),
        };

        if parsed.jsonrpc != "2.0" || parsed.method.trim().is_empty() {
            return json_rpc_error(parsed.id, -32600, "Invalid Request");
        }

        let Request {
            method, params, id, ..
        } = parsed;

        let response = match self.registry.lookup(&method) {
            Some(handler) => match handler.call(params.unwrap_or(Value::Null)).await {
                Ok(result) => json_rpc_result(id, result),
                Err(err) => method_error_to_json_rpc(id, err),
            },
            None => json_rpc_error_with_data(
                id,
                -32601,
                "Method not found",
                Some(json!({
                    "code": "method_not_found",
                    "message": "unknown method name",
                    "details": {
                        "name": method.as_str(),
                    },
                })),
            ),
        };

        info!(
            method = %method,
            outcome = if is_json_rpc_error(&response) { "failure" } else { "success" },
            "request dispatched"
        );

        response
    }
}
