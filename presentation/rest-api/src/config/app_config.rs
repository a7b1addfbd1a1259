use poem::middleware::Cors;

use super::dataset_config::{DatasetConfig, DatasetConfigError};
use super::{
    cors_config, llm_config::LlmConfig, recommendation_config::RecommendationConfig,
    server_config::ServerConfig,
};

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub dataset: DatasetConfig,
    pub llm: LlmConfig,
    pub recommendation: RecommendationConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DatasetConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            dataset: DatasetConfig::from_env()?,
            llm: LlmConfig::from_env(),
            recommendation: RecommendationConfig::from_env(),
        })
    }
}
