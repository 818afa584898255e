use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Uniform envelope wrapped around every response body:
/// `{ "code": 200, "status": "OK", "data": ... }`
///
/// `code` always equals the HTTP status of the response carrying it. `data`
/// is left out of the JSON entirely when there is nothing to return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebResponse<T> {
    pub code: u16,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> WebResponse<T> {
    pub fn new(status: StatusCode, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            status: status_text(status),
            data,
        }
    }

    /// 200 OK carrying `data`
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, Some(data))
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl WebResponse<()> {
    /// 200 OK with no `data`
    pub fn ok_empty() -> Self {
        Self::new(StatusCode::OK, None)
    }
}

/// Upper-cased reason phrase: "OK", "NOT FOUND", "INTERNAL SERVER ERROR"
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("UNKNOWN").to_uppercase()
}

impl<T: Serialize> IntoResponse for WebResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                let code = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    code,
                    Json(json!({
                        "code": code.as_u16(),
                        "status": status_text(code),
                        "data": "Failed to serialize response data"
                    })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<WebResponse<T>, crate::error::ApiError>;
