//! Method registry exposed to the embedding caller
//!
//! Handlers are published under a namespaced wire name. The mapping is built
//! once at startup and is read-only afterwards, so concurrent dispatch tasks
//! share it without synchronization.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::errors::MethodError;

#[async_trait]
pub trait Method: Send + Sync {
    async fn call(&self, params: Value) -> Result<Value, MethodError>;
}

pub struct HandlerRegistry {
    namespace: String,
    methods: BTreeMap<String, Arc<dyn Method>>,
}

impl HandlerRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Publish a handler as `<namespace>.<name>`. Only names starting with an
    /// uppercase letter are reachable from the caller; anything else is
    /// skipped with a warning.
    pub fn register(&mut self, name: &str, method: Arc<dyn Method>) {
        if !name.chars().next().is_some_and(char::is_uppercase) {
            warn!(
                method = name,
                "method name is not capitalized, skipping registration"
            );
            return;
        }

        self.methods.insert(name.to_string(), method);
    }

    pub fn lookup(&self, wire_name: &str) -> Option<Arc<dyn Method>> {
        let name = wire_name
            .strip_prefix(self.namespace.as_str())?
            .strip_prefix('.')?;
        self.methods.get(name).cloned()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Published wire names in sorted order.
    pub fn wire_names(&self) -> impl Iterator<Item = String> + '_ {
        self.methods
            .keys()
            .map(|name| format!("{}.{}", self.namespace, name))
    }
}
