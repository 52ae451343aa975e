pub mod fuzzy;
pub mod intent;
pub mod logbook;
pub mod matcher;
pub mod names;
pub mod retrieval;

use color_eyre::Result;
use std::sync::Arc;
use tracing::warn;

use crate::agents::GroqClient;
use crate::config::Config;
use crate::error::MeetError;
use crate::storage::{Interaction, InteractionStore, SurrealStore};
use intent::{ExtractionSettings, IntentExtractor};
use logbook::LoggingPipeline;
use matcher::MatchResolver;
use retrieval::RetrievalPipeline;

pub type Logbook = LoggingPipeline<dyn InteractionStore>;
pub type Retrieval = RetrievalPipeline<GroqClient, dyn InteractionStore>;

/// Pipelines wired to their collaborators, built once at startup
pub struct Services {
    pub logbook: Logbook,
    retrieval: std::result::Result<Retrieval, String>,
    store: Arc<dyn InteractionStore>,
}

impl Services {
    /// Opens the store and builds both pipelines. A missing API key only
    /// disables retrieval; logging and listing still work.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn InteractionStore> = Arc::new(SurrealStore::open(&config.data_dir()?)?);

        let retrieval = match GroqClient::from_config(&config.model) {
            Ok(client) => {
                let settings = ExtractionSettings {
                    temperature: config.model.temperature,
                    max_tokens: config.model.max_tokens,
                };
                Ok(RetrievalPipeline::new(
                    IntentExtractor::new(client, settings),
                    Arc::clone(&store),
                    MatchResolver::new(config.matching.threshold),
                ))
            }
            Err(error) => {
                warn!(%error, "retrieval disabled");
                Err(error.to_string())
            }
        };

        Ok(Self {
            logbook: LoggingPipeline::new(Arc::clone(&store)),
            retrieval,
            store,
        })
    }

    /// The retrieval pipeline, or the reason it is unavailable
    pub fn retrieval(&self) -> Result<&Retrieval> {
        self.retrieval
            .as_ref()
            .map_err(|reason| color_eyre::eyre::eyre!("{}", reason))
    }

    /// Every stored interaction, ordered by normalized name
    pub fn list(&self) -> std::result::Result<Vec<Interaction>, MeetError> {
        Ok(self.store.list()?)
    }
}
