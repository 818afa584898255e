pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, Dialect, Store};
pub use models::Category;
pub use repository::{CategoryRepository, SqlCategoryRepository};
