use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{
    CompletionService, DocumentService, SynthesisService, VisionService, api_key_is_plausible,
};
use crate::domain::ModelCatalog;
use crate::presentation::config::Settings;

pub struct AppState<L, F>
where
    L: LlmClient,
    F: FileLoader,
{
    pub catalog: Arc<ModelCatalog>,
    pub completion_service: Arc<CompletionService<L>>,
    pub synthesis_service: Arc<SynthesisService<L>>,
    pub vision_service: Arc<VisionService<L>>,
    pub document_service: Arc<DocumentService<F>>,
    pub api_key: Option<Arc<str>>,
}

impl<L, F> AppState<L, F>
where
    L: LlmClient,
    F: FileLoader,
{
    pub fn new(
        llm_client: Arc<L>,
        file_loader: Arc<F>,
        catalog: Arc<ModelCatalog>,
        settings: &Settings,
    ) -> Self {
        let completion_service = Arc::new(CompletionService::new(llm_client, Arc::clone(&catalog)));

        Self {
            synthesis_service: Arc::new(SynthesisService::new(
                Arc::clone(&completion_service),
                settings.synthesis.response_language.clone(),
            )),
            vision_service: Arc::new(VisionService::new(Arc::clone(&completion_service))),
            document_service: Arc::new(DocumentService::new(file_loader)),
            completion_service,
            catalog,
            api_key: settings.upstream.api_key.as_deref().map(Arc::from),
        }
    }

    pub fn api_key_configured(&self) -> bool {
        api_key_is_plausible(self.api_key.as_deref())
    }
}

impl<L, F> Clone for AppState<L, F>
where
    L: LlmClient,
    F: FileLoader,
{
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            completion_service: Arc::clone(&self.completion_service),
            synthesis_service: Arc::clone(&self.synthesis_service),
            vision_service: Arc::clone(&self.vision_service),
            document_service: Arc::clone(&self.document_service),
            api_key: self.api_key.clone(),
        }
    }
}
