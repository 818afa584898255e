use crate::error::ApiError;

/// Any path no route matched
pub async fn not_found() -> ApiError {
    ApiError::not_found("no route for this path")
}

/// A known path requested with a method it does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
