use std::any::Any;

use axum::{http::StatusCode, response::IntoResponse, response::Response};

use crate::middleware::response::WebResponse;

/// Last-resort handler for panics escaping a request; answers 500 with the
/// panic message as `data`
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unexpected error".to_string()
    };

    tracing::error!("Request handler panicked: {}", message);
    WebResponse::new(StatusCode::INTERNAL_SERVER_ERROR, Some(message)).into_response()
}
