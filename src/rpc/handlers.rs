use super::dispatcher::Dispatcher;
use super::protocol::Response;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, header};
use axum::{Extension, Json};
use std::sync::Arc;

pub const ENDPOINT_RPC: &str = "/";

/// HTTP entry point. Protocol errors travel inside the JSON-RPC envelope, so
/// the status is always 200.
pub async fn handle_rpc(
    Extension(dispatcher): Extension<Arc<Dispatcher>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Response>) {
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok());

    let response = dispatcher.dispatch_http(content_length, &body).await;

    tracing::debug!("Replying to id {} (error: {})", response.id, response.is_error());

    (StatusCode::OK, Json(response))
}
