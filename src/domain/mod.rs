mod chat_message;
mod chat_mode;
mod completion;
mod file_info;
mod message_role;
mod model_catalog;
mod synthesis_outcome;
mod upload;

pub use chat_message::{ChatMessage, ContentPart, ImageUrl, MessageContent};
pub use chat_mode::ChatMode;
pub use completion::Completion;
pub use file_info::{FileInfo, FileType};
pub use message_role::MessageRole;
pub use model_catalog::{ModelCatalog, ModelEntry};
pub use synthesis_outcome::{DegradeReason, FALLBACK_MODE, PRO_MODE, SynthesisOutcome};
pub use upload::Upload;
