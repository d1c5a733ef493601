use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ApiKey, GenerationRequest};
use crate::presentation::config::GenerationSettings;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Calls the Gemini `generateContent` endpoint once per request.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: String, max_output_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_output_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
        api_key: &ApiKey,
    ) -> Result<String, LlmClientError> {
        if request.composite_prompt.trim().is_empty() {
            return Err(LlmClientError::EmptyPrompt);
        }

        let body = self.build_request(&request.composite_prompt);

        tracing::debug!(model = %self.model, max_output_tokens = self.max_output_tokens, "Calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let parts = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty candidates".to_string()))?;

        Ok(parts.into_iter().filter_map(|part| part.text).collect())
    }
}

pub fn create_gemini_client(settings: &GenerationSettings) -> GeminiClient {
    GeminiClient::new(
        &settings.base_url,
        settings.model.clone(),
        settings.max_output_tokens,
    )
}
