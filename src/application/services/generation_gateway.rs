use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ApiKey, GenerationRequest, GenerationResult};

/// Single-attempt boundary to the generation model. Every path yields a result.
pub struct GenerationGateway<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    api_key: Option<ApiKey>,
}

impl<L> GenerationGateway<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, api_key: Option<ApiKey>) -> Self {
        Self {
            llm_client,
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let Some(api_key) = self.api_key.as_ref() else {
            tracing::warn!("Generation requested without an API key");
            return GenerationResult::missing_api_key();
        };

        if request.composite_prompt.trim().is_empty() {
            tracing::warn!("Generation requested with an empty prompt");
            return GenerationResult::failure(LlmClientError::EmptyPrompt.to_string());
        }

        match self.llm_client.generate(request, api_key).await {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "Generation succeeded");
                GenerationResult::success(text)
            }
            Err(e) => {
                tracing::error!(error = %e, "Generation failed");
                GenerationResult::failure(e.to_string())
            }
        }
    }
}
