use async_trait::async_trait;

use crate::domain::{ApiKey, GenerationRequest};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
        api_key: &ApiKey,
    ) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("prompt is empty")]
    EmptyPrompt,
}
