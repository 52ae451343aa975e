use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{info, warn};

use crate::agents::LanguageModel;
use crate::error::{Field, MeetError};
use crate::services::intent::{Intent, IntentExtractor};
use crate::services::matcher::{MatchKind, MatchResolver};
use crate::storage::{Interaction, InteractionStore};

/// Result of answering a natural-language query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// A stored interaction matched the extracted name
    Found {
        name: String,
        interaction: Interaction,
        kind: MatchKind,
    },
    /// A name was extracted but nothing stored matched it
    NotFound { name: String },
    /// The model answered directly instead of naming someone
    Info { message: String },
    /// Nothing actionable came out of the query. `warning` carries the model
    /// failure when that is the reason.
    Unresolved { warning: Option<MeetError> },
    /// Blank query or a store failure during lookup
    Failed(MeetError),
}

impl RetrievalOutcome {
    /// The error to show for outcomes that did not find anything
    #[must_use]
    pub fn error(&self) -> Option<MeetError> {
        match self {
            Self::NotFound { name } => Some(MeetError::NoMatch(name.clone())),
            Self::Unresolved { warning } => warning.clone(),
            Self::Failed(error) => Some(error.clone()),
            Self::Found { .. } | Self::Info { .. } => None,
        }
    }
}

/// Query -> intent -> name match -> stored details
pub struct RetrievalPipeline<M, S: ?Sized> {
    extractor: IntentExtractor<M>,
    store: Arc<S>,
    resolver: MatchResolver,
}

impl<M: LanguageModel, S: InteractionStore + ?Sized> RetrievalPipeline<M, S> {
    pub fn new(extractor: IntentExtractor<M>, store: Arc<S>, resolver: MatchResolver) -> Self {
        Self {
            extractor,
            store,
            resolver,
        }
    }

    /// Answers a query. Never fails outright; every error becomes an outcome.
    pub fn retrieve(&self, query: &str) -> RetrievalOutcome {
        if query.trim().is_empty() {
            return RetrievalOutcome::Failed(MeetError::Validation(Field::Query));
        }

        match self.extractor.extract(query) {
            Ok(Intent::Name(name)) => self.lookup(name),
            Ok(Intent::Message(message)) => RetrievalOutcome::Info { message },
            Ok(Intent::Empty) => RetrievalOutcome::Unresolved { warning: None },
            Err(error) => RetrievalOutcome::Unresolved {
                warning: Some(error),
            },
        }
    }

    fn lookup(&self, name: String) -> RetrievalOutcome {
        let records = match self.store.list() {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "failed to load interactions");
                return RetrievalOutcome::Failed(error.into());
            }
        };

        let mut by_key: BTreeMap<String, Interaction> = records
            .into_iter()
            .map(|record| (record.key(), record))
            .collect();
        let candidates: BTreeSet<String> = by_key.keys().cloned().collect();

        let found = self
            .resolver
            .resolve(&name, &candidates)
            .and_then(|found| Some((by_key.remove(&found.key)?, found.kind)));

        match found {
            Some((interaction, kind)) => {
                info!(query = %name, matched = %interaction.name, ?kind, "resolved interaction");
                RetrievalOutcome::Found {
                    name,
                    interaction,
                    kind,
                }
            }
            None => RetrievalOutcome::NotFound { name },
        }
    }
}
