//! Shared application state.

use std::sync::Arc;

use toolverse_core::ToolverseConfig;
use toolverse_genai::{
    Assembler, GenAIConfig, GenerativeGateway, HeadlineFeature, WellnessFeature,
};
use toolverse_search::Catalog;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: ToolverseConfig,
    pub catalog: Arc<Catalog>,
    pub genai_config: GenAIConfig,
    pub wellness: Assembler<WellnessFeature>,
    pub headlines: Assembler<HeadlineFeature>,
}

impl AppState {
    pub fn new(
        config: ToolverseConfig,
        catalog: Arc<Catalog>,
        genai_config: GenAIConfig,
        gateway: Arc<dyn GenerativeGateway>,
    ) -> Self {
        let wellness = Assembler::new(WellnessFeature::new(&genai_config), gateway.clone());
        let headlines = Assembler::new(HeadlineFeature::new(&genai_config), gateway);
        Self {
            config,
            catalog,
            genai_config,
            wellness,
            headlines,
        }
    }
}
