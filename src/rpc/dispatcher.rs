use super::protocol::*;
use super::registry::MethodTable;

use serde_json::Value;
use std::sync::Arc;

/// Parses JSON-RPC requests, resolves their method and builds the response.
///
/// Shared between connections as an `Arc`; nothing in here changes after
/// construction.
pub struct Dispatcher {
    methods: MethodTable,
}

impl Dispatcher {
    pub fn new(methods: MethodTable) -> Arc<Self> {
        tracing::info!("Dispatcher ready with methods: {:?}", methods.methods());
        Arc::new(Self { methods })
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Handles one HTTP request body.
    ///
    /// The body must be exactly as long as the declared content length says;
    /// a missing or unreadable length is treated like unparseable JSON.
    pub async fn dispatch_http(&self, content_length: Option<&str>, body: &[u8]) -> Response {
        let declared = match content_length.map(|value| value.trim().parse::<usize>()) {
            Some(Ok(length)) => length,
            Some(Err(_)) => {
                tracing::info!("Rejecting request with invalid Content-Length");
                return Response::error(Value::Null, RpcError::parse_error("Invalid Content-Length"));
            }
            None => {
                tracing::info!("Rejecting request without Content-Length");
                return Response::error(Value::Null, RpcError::parse_error("Missing Content-Length"));
            }
        };

        if body.len() < declared {
            tracing::info!(
                "Request body truncated: {} of {} bytes",
                body.len(),
                declared
            );
            return Response::error(Value::Null, RpcError::parse_error("Truncated request body"));
        }

        self.dispatch_body(&body[..declared]).await
    }

    pub async fn dispatch_body(&self, body: &[u8]) -> Response {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.dispatch_value(value).await,
            Err(e) => {
                tracing::info!("Error parsing JSON request: {}", e);
                Response::error(
                    Value::Null,
                    RpcError::parse_error("Error parsing JSON request"),
                )
            }
        }
    }

    pub async fn dispatch_value(&self, value: Value) -> Response {
        let request = match parse_envelope(value) {
            Ok(request) => request,
            Err((id, error)) => {
                tracing::info!("Invalid request: {}", error.message);
                return Response::error(id, error);
            }
        };

        let Some(handler) = self.methods.get(&request.method) else {
            tracing::info!("Method not found: {}", request.method);
            return Response::error(request.id, RpcError::method_not_found(&request.method));
        };

        tracing::info!("Dispatching {} (id {})", request.method, request.id);

        // A panicking handler comes back as a JoinError.
        let future = handler(request.id.clone(), request.params);
        let outcome = match tokio::spawn(future).await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                tracing::error!("Handler for {} aborted: {}", request.method, join_error);
                Err(RpcError::internal(format!(
                    "Handler for '{}' failed unexpectedly",
                    request.method
                )))
            }
        };

        match outcome {
            Ok(result) => Response::result(request.id, result),
            Err(error) => {
                tracing::warn!("{} failed: {}", request.method, error);
                Response::error(request.id, error)
            }
        }
    }
}

/// Checks the envelope shape. On failure returns whatever id could be
/// recovered, so the error response can still be correlated.
fn parse_envelope(value: Value) -> Result<Request, (Value, RpcError)> {
    let Value::Object(mut object) = value else {
        return Err((
            Value::Null,
            RpcError::invalid_request("Request must be a JSON object"),
        ));
    };

    let id = object.remove("id").unwrap_or(Value::Null);

    match object.get("jsonrpc") {
        None => {}
        Some(Value::String(version)) if version == JSONRPC_VERSION => {}
        Some(_) => {
            return Err((id, RpcError::invalid_request("Unsupported jsonrpc version")));
        }
    }

    let method = match object.remove("method") {
        Some(Value::String(method)) => method,
        Some(_) => return Err((id, RpcError::invalid_request("Method must be a string"))),
        None => return Err((id, RpcError::invalid_request("Missing method"))),
    };

    let params = match object.remove("params") {
        None | Some(Value::Null) => Value::Object(Default::default()),
        Some(params @ (Value::Object(_) | Value::Array(_))) => params,
        Some(_) => {
            return Err((
                id,
                RpcError::invalid_request("Params must be an object or an array"),
            ));
        }
    };

    Ok(Request::new(&method, params, id))
}
