mod chat_orchestrator;
mod generation_gateway;
mod incremental_revealer;
mod prompt_composer;
mod upload_service;

pub use chat_orchestrator::{ChatOrchestrator, OUTPUT_PLACEHOLDER, OrchestratorError};
pub use generation_gateway::GenerationGateway;
pub use incremental_revealer::{IncrementalRevealer, REVEAL_UNIT_DELAY, reveal_stream};
pub use prompt_composer::{DEFAULT_FALLBACK_STATEMENT, PromptComposer, compose_prompt};
pub use upload_service::UploadService;
