pub mod http;
pub mod llm;
pub mod notifications;
pub mod observability;
pub mod text_processing;
