pub mod api_types;
mod chat;
mod health;
mod upload;

pub use chat::chat_handler;
pub use health::health_handler;
pub use upload::upload_handler;
