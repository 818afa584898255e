use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::models::Category;

/// Body of `POST /api/categories`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryCreateRequest {
    // absent names fall through to validation, same as empty ones
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
}

/// Body of `PUT /api/categories/:id`; `id` always comes from the path
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryUpdateRequest {
    #[serde(skip_deserializing)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
