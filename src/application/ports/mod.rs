mod chat_backend;
mod file_loader;
mod llm_client;
mod notifier;

pub use chat_backend::{ChatBackend, TransportError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use notifier::Notifier;
