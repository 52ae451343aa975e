use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Field, MeetError, StoreError};
use crate::services::names::normalize;
use crate::storage::{Interaction, InteractionStore};

/// Result of logging a new interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    Saved(Interaction),
    /// Nothing was written
    Rejected(MeetError),
}

/// Validates and saves new interactions, one per normalized name
pub struct LoggingPipeline<S: ?Sized> {
    store: Arc<S>,
}

impl<S: InteractionStore + ?Sized> LoggingPipeline<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Saves `details` under `name` unless either is blank or the normalized
    /// name is already taken.
    ///
    /// The display name is stored trimmed but otherwise as entered.
    pub fn log(&self, name: &str, details: &str) -> LogOutcome {
        match self.try_log(name, details) {
            Ok(interaction) => {
                info!(name = %interaction.name, "saved interaction");
                LogOutcome::Saved(interaction)
            }
            Err(error) => {
                if matches!(error, MeetError::Store(_)) {
                    warn!(%error, "failed to save interaction");
                }
                LogOutcome::Rejected(error)
            }
        }
    }

    fn try_log(&self, name: &str, details: &str) -> Result<Interaction, MeetError> {
        if name.trim().is_empty() {
            return Err(MeetError::Validation(Field::Name));
        }
        if details.trim().is_empty() {
            return Err(MeetError::Validation(Field::Details));
        }

        let normalized = normalize(name);
        let duplicate = || MeetError::DuplicateName {
            name: name.to_string(),
            normalized: normalized.clone(),
        };

        let existing: BTreeSet<String> = self
            .store
            .list()?
            .iter()
            .map(Interaction::key)
            .collect();
        if existing.contains(&normalized) {
            return Err(duplicate());
        }

        let interaction = Interaction::new(name.trim(), details);
        match self.store.insert(&interaction) {
            Ok(()) => Ok(interaction),
            Err(StoreError::Conflict { .. }) => Err(duplicate()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_saves_new_interaction() {
        let store = Arc::new(MemoryStore::default());
        let outcome = LoggingPipeline::new(Arc::clone(&store)).log("Pritha", "discussed project X");

        let LogOutcome::Saved(interaction) = outcome else {
            panic!("expected the interaction to be saved");
        };
        assert_eq!(interaction.name, "Pritha");
        assert_eq!(interaction.details, "discussed project X");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_normalized_duplicate() {
        let store = Arc::new(MemoryStore::default());
        let logbook = LoggingPipeline::new(Arc::clone(&store));
        assert!(matches!(
            logbook.log("John", "met for coffee"),
            LogOutcome::Saved(_)
        ));

        assert_eq!(
            logbook.log("john", "anything"),
            LogOutcome::Rejected(MeetError::DuplicateName {
                name: "john".to_string(),
                normalized: "john".to_string(),
            })
        );
        assert_eq!(
            logbook.log("  JOHN ", "anything"),
            LogOutcome::Rejected(MeetError::DuplicateName {
                name: "  JOHN ".to_string(),
                normalized: "john".to_string(),
            })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_display_name_is_trimmed() {
        let store = Arc::new(MemoryStore::default());
        let outcome = LoggingPipeline::new(store).log("  Mary Ann ", "walk");
        assert!(matches!(outcome, LogOutcome::Saved(ref i) if i.name == "Mary Ann"));
    }

    #[test]
    fn test_blank_inputs_are_rejected() {
        let store = Arc::new(MemoryStore::default());
        let logbook = LoggingPipeline::new(Arc::clone(&store));
        assert_eq!(
            logbook.log("   ", "details"),
            LogOutcome::Rejected(MeetError::Validation(Field::Name))
        );
        assert_eq!(
            logbook.log("John", "\n\t"),
            LogOutcome::Rejected(MeetError::Validation(Field::Details))
        );
        assert_eq!(store.len(), 0);
        assert_eq!(store.reads(), 0);
    }

    #[test]
    fn test_store_failure_leaves_nothing_behind() {
        let store = Arc::new(MemoryStore::default());
        store.set_failing(true);
        let outcome = LoggingPipeline::new(Arc::clone(&store)).log("John", "met for coffee");
        assert!(matches!(
            outcome,
            LogOutcome::Rejected(MeetError::Store(StoreError::Backend(_)))
        ));

        store.set_failing(false);
        assert_eq!(store.len(), 0);
    }
}
