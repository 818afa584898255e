use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::Authenticator;
use crate::error::ApiError;

/// Rejects any request the authenticator refuses with a 401 envelope.
///
/// Runs ahead of routing, so unknown paths are rejected too and nothing
/// downstream (handlers, the store) is touched.
pub async fn api_key_middleware(
    State(authenticator): State<Arc<dyn Authenticator>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(err) = authenticator.authenticate(request.headers()) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request: {}",
            err
        );
        return Err(ApiError::unauthorized(err.to_string()));
    }

    Ok(next.run(request).await)
}
