use serde::{Deserialize, Serialize};

use crate::domain::{GENERATION_FAILURE_MESSAGE, GenerationResult, UploadResult};

/// Body of `POST /api/upload`. Success carries `parsedText`, failure carries `text` and `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            text: Some("Unable to process the file.".to_string()),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn into_upload_result(self) -> UploadResult {
        if let Some(error) = self.error {
            return UploadResult::failed(error);
        }
        UploadResult {
            extracted_length: self.text_length,
            extracted_text: self.parsed_text.unwrap_or_default(),
            source_file_name: self.file_name,
            source_file_size_bytes: self.file_size,
            error_message: None,
        }
    }
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        if let Some(error) = result.error_message {
            return Self::failure(error);
        }
        Self {
            parsed_text: Some(result.extracted_text),
            file_name: result.source_file_name,
            file_size: result.source_file_size_bytes,
            text_length: result.extracted_length,
            text: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_prompt: String,
}

/// Body of `POST /api/chat`. Generation failures are reported here, not via the status code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn into_generation_result(self) -> GenerationResult {
        let failed = self.error.is_some() || self.text == GENERATION_FAILURE_MESSAGE;
        GenerationResult {
            text: self.text,
            failed,
            diagnostic: self.error,
        }
    }
}

impl From<GenerationResult> for ChatResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            text: result.text,
            error: if result.failed {
                result.diagnostic
            } else {
                None
            },
        }
    }
}
