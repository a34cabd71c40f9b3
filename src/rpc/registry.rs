//! Method Table
//!
//! Maps JSON-RPC method names to async handler functions. The table is filled
//! once at startup and then handed to the [`Dispatcher`](super::dispatcher::Dispatcher),
//! which only ever reads it.

use super::protocol::RpcError;

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type MethodFuture = Pin<Box<dyn Future<Output = Result<Value, RpcError>> + Send>>;

/// Type alias for a thread-safe, asynchronous method handler.
/// It receives the request `id` and `params` and resolves to the call's result.
pub type MethodFn = Arc<dyn Fn(Value, Value) -> MethodFuture + Send + Sync>;

#[derive(Default)]
pub struct MethodTable {
    methods: HashMap<&'static str, MethodFn>,
}

impl MethodTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `method`, replacing any earlier entry.
    ///
    /// # Arguments
    /// * `method` - The JSON-RPC method name (e.g. "createNetwork").
    /// * `handler` - Async function receiving the request `id` and `params`.
    pub fn register<F, Fut>(&mut self, method: &'static str, handler: F)
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, RpcError>> + Send + 'static,
    {
        let method_fn: MethodFn =
            Arc::new(move |id: Value, params: Value| Box::pin(handler(id, params)) as MethodFuture);

        if self.methods.insert(method, method_fn).is_some() {
            tracing::warn!("Replaced handler for method: {}", method);
        } else {
            tracing::info!("Registered method: {}", method);
        }
    }

    /// Looks up the handler for `method`.
    pub fn get(&self, method: &str) -> Option<&MethodFn> {
        self.methods.get(method)
    }

    /// Whether a handler is registered under `method`.
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
