use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::services::names::normalize;

const TABLE: &str = "interaction";

/// A logged interaction with a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Display name as entered
    pub name: String,
    pub details: String,
    pub created_at: String,
}

impl Interaction {
    /// Creates a record stamped with the current local time
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Normalized name, the record's identity
    #[must_use]
    pub fn key(&self) -> String {
        normalize(&self.name)
    }
}

/// Persistence for interaction records
pub trait InteractionStore {
    /// All records, ordered by normalized name
    fn list(&self) -> Result<Vec<Interaction>, StoreError>;

    /// Looks up a record by normalized name
    fn get(&self, key: &str) -> Result<Option<Interaction>, StoreError>;

    /// Fails with `StoreError::Conflict` when the normalized name is taken
    fn insert(&self, interaction: &Interaction) -> Result<(), StoreError>;
}

/// Internal record for SurrealDB; the record id is the lookup key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InteractionRecord {
    name: String,
    lookup_key: String,
    details: String,
    created_at: String,
}

impl From<InteractionRecord> for Interaction {
    fn from(record: InteractionRecord) -> Self {
        Self {
            name: record.name,
            details: record.details,
            created_at: record.created_at,
        }
    }
}

/// Interaction storage on embedded SurrealDB.
///
/// SurrealDB is async; the store owns a runtime and blocks on each call.
pub struct SurrealStore {
    db: Surreal<Db>,
    runtime: Runtime,
}

impl SurrealStore {
    /// Opens (or creates) the on-disk database under `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let db_path = data_dir.join("meetlog.db");
        let runtime = Runtime::new()?;
        let db = runtime.block_on(async { Surreal::new::<RocksDb>(db_path).await })?;
        info!(path = %data_dir.display(), "opened interaction store");
        Self::init(db, runtime)
    }

    /// Non-persistent store backed by the in-memory engine
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let runtime = Runtime::new()?;
        let db =
            runtime.block_on(async { Surreal::new::<surrealdb::engine::local::Mem>(()).await })?;
        Self::init(db, runtime)
    }

    fn init(db: Surreal<Db>, runtime: Runtime) -> Result<Self> {
        runtime.block_on(async {
            db.use_ns("meetlog").use_db("main").await?;
            db.query(
                "
                DEFINE TABLE IF NOT EXISTS interaction SCHEMAFULL;
                DEFINE FIELD IF NOT EXISTS name ON interaction TYPE string;
                DEFINE FIELD IF NOT EXISTS lookup_key ON interaction TYPE string;
                DEFINE FIELD IF NOT EXISTS details ON interaction TYPE string;
                DEFINE FIELD IF NOT EXISTS created_at ON interaction TYPE string;
                DEFINE INDEX IF NOT EXISTS idx_interaction_key ON interaction
                    FIELDS lookup_key UNIQUE;
            ",
            )
            .await?
            .check()?;
            Ok::<_, surrealdb::Error>(())
        })?;
        Ok(Self { db, runtime })
    }
}

impl InteractionStore for SurrealStore {
    fn list(&self) -> Result<Vec<Interaction>, StoreError> {
        let records: Vec<InteractionRecord> = self.runtime.block_on(async {
            let mut response = self
                .db
                .query("SELECT name, lookup_key, details, created_at FROM interaction ORDER BY lookup_key ASC")
                .await?;
            response.take(0)
        })?;
        Ok(records.into_iter().map(Interaction::from).collect())
    }

    fn get(&self, key: &str) -> Result<Option<Interaction>, StoreError> {
        let record: Option<InteractionRecord> = self
            .runtime
            .block_on(async { self.db.select((TABLE, key.to_string())).await })?;
        Ok(record.map(Interaction::from))
    }

    fn insert(&self, interaction: &Interaction) -> Result<(), StoreError> {
        let key = interaction.key();
        if self.get(&key)?.is_some() {
            return Err(StoreError::Conflict { key });
        }

        let record = InteractionRecord {
            name: interaction.name.clone(),
            lookup_key: key.clone(),
            details: interaction.details.clone(),
            created_at: interaction.created_at.clone(),
        };
        let created: Result<Option<InteractionRecord>, surrealdb::Error> = self
            .runtime
            .block_on(async { self.db.create((TABLE, key.clone())).content(record).await });

        match created {
            Ok(_) => {
                debug!(%key, "inserted interaction");
                Ok(())
            }
            // Lost a race with another writer between the check and the create
            Err(surrealdb::Error::Db(
                surrealdb::error::Db::RecordExists { .. } | surrealdb::error::Db::IndexExists { .. },
            )) => Err(StoreError::Conflict { key }),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
