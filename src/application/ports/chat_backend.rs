use async_trait::async_trait;

use crate::domain::{GenerationRequest, GenerationResult, UploadResult, UploadedFile};

/// The two server endpoints as seen from the chat client.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Server-side extraction failures come back as `UploadResult::failed`, not as `Err`.
    async fn upload(&self, file: &UploadedFile) -> Result<UploadResult, TransportError>;

    async fn chat(&self, request: &GenerationRequest) -> Result<GenerationResult, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}
