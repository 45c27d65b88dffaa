pub mod api;
pub mod config;
pub mod error;
pub mod formatter;
pub mod llm;
pub mod prompts;
pub mod schedule;
pub mod scraper;
pub mod transform;

use std::sync::Arc;
use config::Config;
use llm::{OpenAiClient, TextProvider};
use schedule::ScheduleCache;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TextProvider>,
    pub schedule: Arc<ScheduleCache>,
}

impl AppState {
    pub fn new(config: &Config) -> error::Result<Self> {
        let provider = OpenAiClient::from_config(config)?;
        Ok(Self::with_provider(Arc::new(provider), ScheduleCache::new()))
    }

    pub fn with_provider(provider: Arc<dyn TextProvider>, schedule: ScheduleCache) -> Self {
        AppState {
            provider,
            schedule: Arc::new(schedule),
        }
    }
}
