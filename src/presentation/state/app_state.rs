use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{GenerationGateway, UploadService};
use crate::presentation::config::Settings;

pub struct AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub upload_service: Arc<UploadService<F>>,
    pub generation_gateway: Arc<GenerationGateway<L>>,
    pub settings: Settings,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            upload_service: Arc::clone(&self.upload_service),
            generation_gateway: Arc::clone(&self.generation_gateway),
            settings: self.settings.clone(),
        }
    }
}
