use thiserror::Error;

/// Failures reported by an `InteractionStore`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store's own uniqueness constraint rejected the write
    #[error("a record with key '{key}' already exists")]
    Conflict { key: String },
    #[error("{0}")]
    Backend(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(error: surrealdb::Error) -> Self {
        Self::Backend(error.to_string())
    }
}

/// Which required input was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Details,
    Query,
}

/// Errors surfaced by the logging and retrieval pipelines
///
/// The `Display` text is what the user sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MeetError {
    #[error("{}", validation_message(.0))]
    Validation(Field),

    #[error("Interaction with '{name}' (normalized: '{normalized}') already exists. Use a unique name.")]
    DuplicateName { name: String, normalized: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Language model error: {0}")]
    ModelCall(String),

    #[error("No interaction found with '{0}' or a close match (case-insensitive).")]
    NoMatch(String),
}

fn validation_message(field: &Field) -> &'static str {
    match field {
        Field::Name | Field::Details => "Please provide both a name and interaction details.",
        Field::Query => "Please enter a query.",
    }
}
