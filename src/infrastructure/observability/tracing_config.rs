use crate::presentation::config::LoggingSettings;

const DEFAULT_FILTER: &str = "info,askdoc=debug,tower_http=debug";

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn from_settings(settings: &LoggingSettings, environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: settings.enable_json,
            filter: settings.level.clone(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}
