mod api_key;
mod chat_state;
mod display_buffer;
mod document;
mod document_id;
mod generation;
mod notification;
mod upload_result;
mod uploaded_file;

pub use api_key::ApiKey;
pub use chat_state::ChatState;
pub use display_buffer::DisplayBuffer;
pub use document::{ContentType, Document};
pub use document_id::DocumentId;
pub use generation::{
    GENERATION_FAILURE_MESSAGE, GenerationRequest, GenerationResult, MISSING_API_KEY_DETAIL,
    MISSING_API_KEY_MESSAGE,
};
pub use notification::{Notification, NotificationLevel};
pub use upload_result::UploadResult;
pub use uploaded_file::UploadedFile;
