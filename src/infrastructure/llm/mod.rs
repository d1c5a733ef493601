mod gemini_client;

pub use gemini_client::{GeminiClient, create_gemini_client};
