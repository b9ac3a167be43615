//! Connection-per-call record store.
//!
//! # Responsibility
//! - Expose the four catalog operations: list, get-by-id, insert, update.
//! - Own the connection lifecycle: one connection per call, one statement.
//! - Classify failures into storage-unavailable vs query failures.
//!
//! # Invariants
//! - Every connection is released before the operation returns, on success
//!   and on every error path.
//! - No state is shared between calls besides the database file.
//! - Log lines carry ids and counts only, never record text.

use crate::config::StoreConfig;
use crate::db::{open_db, DbError};
use crate::model::coffee::{CoffeeDraft, CoffeeId, CoffeeRecord, ValidationError};
use crate::repo::coffee_repo::{
    CoffeeListing, CoffeeRepository, RepoError, SqliteCoffeeRepository,
};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by record store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be opened or bootstrapped.
    StorageUnavailable { path: PathBuf, source: DbError },
    /// A read or write statement failed inside the engine.
    QueryFailed(RepoError),
    /// No row has the requested id.
    NotFound(CoffeeId),
    /// The payload was rejected before any SQL ran.
    Validation(ValidationError),
    /// A stored row does not satisfy record invariants.
    InvalidData(String),
}

impl StoreError {
    /// Stable snake_case code for logs and UI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::QueryFailed(_) => "query_failed",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable { path, source } => write!(
                f,
                "database `{}` is unavailable: {source}",
                path.display()
            ),
            Self::QueryFailed(err) => write!(f, "query failed: {err}"),
            Self::NotFound(id) => write!(f, "coffee record not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted coffee data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::QueryFailed(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::InvalidData(message) => Self::InvalidData(message),
            other @ RepoError::Db(_) => Self::QueryFailed(other),
        }
    }
}

/// Durable CRUD access to the coffee table.
#[derive(Debug, Clone)]
pub struct CoffeeStore {
    config: StoreConfig,
}

impl CoffeeStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Returns every readable record in storage-native order.
    ///
    /// An empty table yields an empty listing. Rows that break record
    /// invariants are left out and their ids reported in `skipped`.
    pub fn list_all(&self) -> StoreResult<CoffeeListing> {
        self.run("coffee_list", |repo| repo.list_all())
            .inspect(|listing| {
                info!(
                    "event=coffee_list module=store count={}",
                    listing.records.len()
                );
                for id in &listing.skipped {
                    warn!(
                        "event=coffee_list module=store status=skipped coffee_id={id} error_code=invalid_data"
                    );
                }
            })
    }

    /// Returns the record with `id`, or `StoreError::NotFound`.
    pub fn get_by_id(&self, id: CoffeeId) -> StoreResult<CoffeeRecord> {
        self.run("coffee_get", |repo| repo.get_by_id(id))?
            .ok_or(StoreError::NotFound(id))
    }

    /// Persists a new record and returns its storage-assigned id.
    ///
    /// Invalid drafts are rejected before a connection is opened.
    pub fn insert(&self, draft: &CoffeeDraft) -> StoreResult<CoffeeId> {
        draft.validate().map_err(StoreError::Validation)?;
        self.run("coffee_insert", |repo| repo.insert(draft))
            .inspect(|id| info!("event=coffee_insert module=store coffee_id={id}"))
    }

    /// Overwrites every mutable field of record `id`.
    ///
    /// Returns `StoreError::NotFound` when no row matches.
    pub fn update(&self, id: CoffeeId, draft: &CoffeeDraft) -> StoreResult<()> {
        draft.validate().map_err(StoreError::Validation)?;
        self.run("coffee_update", |repo| repo.update(id, draft))
            .inspect(|_| info!("event=coffee_update module=store coffee_id={id}"))
    }

    fn run<T>(
        &self,
        event: &str,
        op: impl FnOnce(&SqliteCoffeeRepository<'_>) -> Result<T, RepoError>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        let path = self.config.db_path();

        let conn = open_db(path, self.config.open).map_err(|source| {
            error!(
                "event={} module=store status=error duration_ms={} error_code=storage_unavailable",
                event,
                started_at.elapsed().as_millis()
            );
            StoreError::StorageUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let result = {
            let repo = SqliteCoffeeRepository::new(&conn);
            op(&repo)
        };
        drop(conn);

        match result {
            Ok(value) => {
                info!(
                    "event={} module=store status=ok duration_ms={}",
                    event,
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                let err = StoreError::from(err);
                error!(
                    "event={} module=store status=error duration_ms={} error_code={}",
                    event,
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                Err(err)
            }
        }
    }
}
