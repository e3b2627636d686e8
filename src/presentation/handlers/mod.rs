mod analyze;
pub mod api_types;
mod chat;
pub mod error;
mod health;
mod models;
mod multipart_form;
mod upload;
mod vision;

pub use analyze::analyze_handler;
pub use chat::chat_handler;
pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use models::models_handler;
pub use upload::upload_handler;
pub use vision::vision_handler;
