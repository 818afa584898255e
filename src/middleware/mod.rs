pub mod auth;
pub mod panic;
pub mod response;

pub use auth::api_key_middleware;
pub use panic::handle_panic;
pub use response::{ApiResult, WebResponse};
