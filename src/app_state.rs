use crate::{
    config::Config,
    services::{GenerationController, HttpJobSubmitter},
    store::JsonFileStore,
    ui::ConsoleRenderer,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<GenerationController>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        // Initialize collaborators
        let submitter = Arc::new(HttpJobSubmitter::new(&config.generation)?);
        let store = Arc::new(JsonFileStore::from_config(&config.storage));
        let renderer = Arc::new(ConsoleRenderer::new());

        let controller = Arc::new(GenerationController::new(
            &config, submitter, renderer, store,
        ));

        Ok(Self {
            controller,
            config: Arc::new(config),
        })
    }
}
