pub mod category;

pub use category::{CategoryCreateRequest, CategoryResponse, CategoryUpdateRequest};
