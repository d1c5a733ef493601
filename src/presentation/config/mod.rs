mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    API_KEY_ENV, DEFAULT_GEMINI_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
    GenerationSettings, LoggingSettings, ServerSettings, Settings, SettingsError, UploadSettings,
};
