use std::sync::Arc;

use crate::{provider::ResultsProvider, utils::config::Config};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ResultsProvider>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn ResultsProvider>) -> Self {
        AppState { provider, config }
    }
}
