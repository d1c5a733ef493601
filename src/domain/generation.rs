/// Shown to the user whenever generation fails for a reason other than a missing key.
pub const GENERATION_FAILURE_MESSAGE: &str = "Unable to process the prompt. Please try again.";
pub const MISSING_API_KEY_MESSAGE: &str = "API key is missing";
pub const MISSING_API_KEY_DETAIL: &str = "GEMINI_API_KEY not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub composite_prompt: String,
}

impl GenerationRequest {
    pub fn new(composite_prompt: impl Into<String>) -> Self {
        Self {
            composite_prompt: composite_prompt.into(),
        }
    }
}

/// Always carries displayable text, even when `failed` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    pub failed: bool,
    pub diagnostic: Option<String>,
}

impl GenerationResult {
    pub fn success(text: String) -> Self {
        Self {
            text,
            failed: false,
            diagnostic: None,
        }
    }

    pub fn failure(diagnostic: impl Into<String>) -> Self {
        Self {
            text: GENERATION_FAILURE_MESSAGE.to_string(),
            failed: true,
            diagnostic: Some(diagnostic.into()),
        }
    }

    pub fn missing_api_key() -> Self {
        Self {
            text: MISSING_API_KEY_MESSAGE.to_string(),
            failed: true,
            diagnostic: Some(MISSING_API_KEY_DETAIL.to_string()),
        }
    }

    pub fn is_apology(&self) -> bool {
        self.text == GENERATION_FAILURE_MESSAGE
    }
}
