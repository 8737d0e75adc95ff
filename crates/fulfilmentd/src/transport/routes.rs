//! The webhook route.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tracing::error;

use fulfilment::{Dispatcher, TEXT_CONTENT_TYPE, WebhookResponse};

use super::TRANSPORT_TARGET;
use super::headers::HttpHeaders;

/// Builds a router with a single POST route at `path`.
///
/// Other methods on the route receive 405; other paths receive 404.
pub fn webhook_router(path: &str, dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route(path, post(receive_webhook))
        .with_state(dispatcher)
}

async fn receive_webhook(
    State(dispatcher): State<Arc<Dispatcher>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let outcome =
        tokio::task::spawn_blocking(move || dispatcher.handle(&HttpHeaders(&headers), &body))
            .await;
    match outcome {
        Ok(Ok(response)) => render(response),
        Ok(Err(failure)) => {
            error!(
                target: TRANSPORT_TARGET,
                status = failure.status_code(),
                error = %failure,
                "webhook dispatch failed"
            );
            internal_error(failure.to_string())
        }
        Err(join_error) => {
            error!(
                target: TRANSPORT_TARGET,
                error = %join_error,
                "webhook handler aborted"
            );
            internal_error("webhook handler aborted".to_owned())
        }
    }
}

fn render(response: WebhookResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response.content_type();
    (
        status,
        [(header::CONTENT_TYPE, content_type)],
        response.into_body(),
    )
        .into_response()
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        message,
    )
        .into_response()
}
