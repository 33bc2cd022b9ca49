use std::sync::Arc;

use crate::application::services::PipelineService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pipeline_service: Arc<PipelineService>,
    pub settings: Settings,
}
