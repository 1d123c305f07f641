//! Wiring from configuration to ready-to-use jobs.

use std::sync::Arc;

use ecowatch_client::{
    FixedDelay, GNewsClient, GNewsConfig, GeminiClient, GeminiConfig, NewsSource, TextGenerator, UpstreamError,
};
use ecowatch_core::{AppConfig, Error, Store};
use tracing::warn;

use crate::{Analyst, ImpactJob, NewsRefresher, NewsScheduler, NewsSettings};

/// Shared handles built once per process.
///
/// Missing provider keys are not fatal here: news falls back to the bundled
/// set and the Gemini-backed operations report `NotConfigured` when used.
pub struct Services {
    pub config: AppConfig,
    pub store: Store,
    news: NewsRefresher,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Services {
    /// Open the configured database and build all clients.
    pub async fn open(config: AppConfig) -> Result<Self, Error> {
        let store = Store::open(&config.db_path).await?;
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: Store) -> Result<Self, Error> {
        let source: Option<Arc<dyn NewsSource>> = match GNewsConfig::from_app(&config) {
            Ok(gnews) => Some(Arc::new(GNewsClient::new(gnews)?)),
            Err(UpstreamError::MissingApiKey(var)) => {
                warn!(var, "news API key not set, serving fallback articles");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let generator: Option<Arc<dyn TextGenerator>> = match GeminiConfig::from_app(&config) {
            Ok(gemini) => Some(Arc::new(GeminiClient::new(gemini)?)),
            Err(UpstreamError::MissingApiKey(var)) => {
                warn!(var, "generation API key not set, analysis operations are disabled");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let news = NewsRefresher::new(Arc::new(store.clone()), source, NewsSettings::from_app(&config));
        Ok(Self { config, store, news, generator })
    }

    /// Replace the text generator, mainly for tests and alternate providers.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn news(&self) -> &NewsRefresher {
        &self.news
    }

    pub fn scheduler(&self) -> NewsScheduler {
        NewsScheduler::new(self.news.clone())
    }

    pub fn impact_job(&self) -> Result<ImpactJob, Error> {
        let generator = self.require_generator()?;
        let pacer = Arc::new(FixedDelay::new(self.config.enrichment_delay()));
        Ok(ImpactJob::new(Arc::new(self.store.clone()), generator, pacer))
    }

    pub fn analyst(&self) -> Result<Analyst, Error> {
        Ok(Analyst::new(Arc::new(self.store.clone()), self.require_generator()?))
    }

    fn require_generator(&self) -> Result<Arc<dyn TextGenerator>, Error> {
        if let Some(generator) = &self.generator {
            return Ok(generator.clone());
        }
        self.config.require_gemini_api_key()?;
        Err(Error::NotConfigured("text generator unavailable".to_string()))
    }
}
