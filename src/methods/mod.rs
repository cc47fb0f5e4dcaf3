//! RPC methods exposed to the embedding Lua caller
//!
//! Provides the `Add3` arithmetic example and the `Code`/`Help` introspection
//! methods every plugin publishes, plus the registry wiring that applies
//! payload transcoding where a method declares it.

pub mod transcode;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::MethodError;
use crate::rpc::registry::{HandlerRegistry, Method};
use transcode::Transcoded;

pub const LUA_NAMESPACE: &str = "Lua";

/// Lua wrapper code loaded by the caller; `$0` is replaced with the plugin path.
const LUA_CODE: &str = r#"
function add3(a, b)
  return CallPlugin("$0", "Add3", a, b)
end
"#;

/// Help text for the functions the plugin makes available to Lua.
const LUA_HELP: &str =
    "\nadd3(number, number) -> number // Adds two numbers and then the number 3\n";

/// Build the read-only method registry published under the `Lua.` namespace.
pub fn build_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new(LUA_NAMESPACE);
    registry.register("Add3", Arc::new(Transcoded::new(Add3)));
    registry.register("Code", Arc::new(Code));
    registry.register("Help", Arc::new(Help));
    registry
}

struct Add3;

#[async_trait]
impl Method for Add3 {
    async fn call(&self, params: Value) -> Result<Value, MethodError> {
        let args: Vec<f64> = serde_json::from_value(params).map_err(|_| {
            MethodError::invalid_params("invalid_arguments", "Add3 requires two numeric arguments")
        })?;

        let [a, b] = args.as_slice() else {
            return Err(MethodError::invalid_params(
                "invalid_arguments",
                "Add3 requires exactly two numeric arguments",
            ));
        };

        Ok(json!(a + b + 3.0))
    }
}

struct Code;

#[async_trait]
impl Method for Code {
    async fn call(&self, params: Value) -> Result<Value, MethodError> {
        let path = params
            .as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_str)
            .ok_or_else(|| {
                MethodError::invalid_params(
                    "invalid_arguments",
                    "Code requires the plugin path as its first argument",
                )
            })?;

        Ok(Value::String(LUA_CODE.replace("$0", path)))
    }
}

struct Help;

#[async_trait]
impl Method for Help {
    async fn call(&self, _params: Value) -> Result<Value, MethodError> {
        Ok(Value::String(LUA_HELP.to_string()))
    }
}
