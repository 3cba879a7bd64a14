// HTTP server setup (Axum)
pub mod app;
pub mod error;
pub mod flash;
pub mod routes;

pub use app::*;
pub use error::ApiError;
pub use flash::{Flash, FlashLevel};
