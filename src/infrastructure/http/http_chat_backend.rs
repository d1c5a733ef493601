use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::application::ports::{ChatBackend, TransportError};
use crate::domain::{GenerationRequest, GenerationResult, UploadResult, UploadedFile};
use crate::presentation::handlers::api_types::{ChatRequest, ChatResponse, UploadResponse};

const UPLOAD_FIELD: &str = "file";

/// Talks to the askdoc server's upload and chat endpoints.
pub struct HttpChatBackend {
    client: Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn upload(&self, file: &UploadedFile) -> Result<UploadResult, TransportError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.content_type.as_mime())
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        // Rejections keep their JSON error body so the user sees the reason.
        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(parsed) if status.is_success() || parsed.error.is_some() => {
                Ok(parsed.into_upload_result())
            }
            Err(e) if status.is_success() => Err(TransportError::Decode(e.to_string())),
            _ => Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }

    async fn chat(&self, request: &GenerationRequest) -> Result<GenerationResult, TransportError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&ChatRequest {
                user_prompt: request.composite_prompt.clone(),
            })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(parsed.into_generation_result())
    }
}
