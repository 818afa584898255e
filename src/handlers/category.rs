// handlers/category.rs - /api/categories[/:category_id]
//
// Handlers only translate HTTP to service calls: extract, call, wrap in the
// envelope. Rejected extractors and service errors both become ApiError.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

use crate::api::{CategoryCreateRequest, CategoryResponse, CategoryUpdateRequest};
use crate::middleware::response::{ApiResult, WebResponse};
use crate::services::CategoryService;

/// GET /api/categories - all categories in ascending id order
pub async fn find_all(State(service): State<CategoryService>) -> ApiResult<Vec<CategoryResponse>> {
    let categories = service.find_all().await?;
    Ok(WebResponse::ok(categories))
}

/// GET /api/categories/:category_id
pub async fn find_by_id(
    State(service): State<CategoryService>,
    category_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<CategoryResponse> {
    let Path(id) = category_id?;
    let category = service.find_by_id(id).await?;
    Ok(WebResponse::ok(category))
}

/// POST /api/categories - `{ "name": ... }`, answers with the assigned id
pub async fn create(
    State(service): State<CategoryService>,
    payload: Result<Json<CategoryCreateRequest>, JsonRejection>,
) -> ApiResult<CategoryResponse> {
    let Json(request) = payload?;
    let category = service.create(request).await?;
    Ok(WebResponse::ok(category))
}

/// PUT /api/categories/:category_id - `{ "name": ... }`
pub async fn update(
    State(service): State<CategoryService>,
    category_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryUpdateRequest>, JsonRejection>,
) -> ApiResult<CategoryResponse> {
    let Path(id) = category_id?;
    let Json(mut request) = payload?;
    request.id = id;

    let category = service.update(request).await?;
    Ok(WebResponse::ok(category))
}

/// DELETE /api/categories/:category_id - envelope without `data`
pub async fn delete(
    State(service): State<CategoryService>,
    category_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = category_id?;
    service.delete(id).await?;
    Ok(WebResponse::ok_empty())
}
