pub mod category;
pub mod fallback;
