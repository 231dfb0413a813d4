//! Repository Module
//!
//! CRUD operations over the SurrealDB document collections.

pub mod booking;
pub mod contact;
pub mod hotel;

// Re-exports
pub use booking::BookingRepository;
pub use contact::ContactRepository;
pub use hotel::HotelRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Serialization(e) => AppError::internal(e.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// Records live at `table:key` where `key` is a UUID v7 (simple form) generated
// on insert. v7 keys are monotonic within the process, so `id` breaks ties
// between records stamped in the same millisecond. The API only ever sees the bare key: every SELECT projects
// `record::id(id) AS id`, and lookups rebuild the record id with
// `type::thing($table, $id)`.

const SELECT_ALL: &str =
    "SELECT *, record::id(id) AS id FROM type::table($table) ORDER BY createdAt ASC, id ASC";
const SELECT_ONE: &str = "SELECT *, record::id(id) AS id FROM type::thing($table, $id)";
const CREATE_ONE: &str = "CREATE type::thing($table, $id) CONTENT $content";

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// All records of `table` in creation order
    pub async fn list<T: DeserializeOwned>(&self, table: &'static str) -> RepoResult<Vec<T>> {
        let mut response = self.db.query(SELECT_ALL).bind(("table", table)).await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows)
    }

    /// Record `table:id`, if present
    pub async fn find<T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &str,
    ) -> RepoResult<Option<T>> {
        let mut response = self
            .db
            .query(SELECT_ONE)
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<T> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Insert `content` under a fresh id, stamped with `createdAt`
    pub async fn insert<T: DeserializeOwned>(
        &self,
        table: &'static str,
        content: impl Serialize,
    ) -> RepoResult<T> {
        let id = uuid::Uuid::now_v7().simple().to_string();

        let mut document = serde_json::to_value(content)?;
        if let Some(fields) = document.as_object_mut() {
            fields.insert("createdAt".into(), shared::util::now_millis().into());
        }

        self.db
            .query(CREATE_ONE)
            .bind(("table", table))
            .bind(("id", id.clone()))
            .bind(("content", document))
            .await?
            .check()?;

        self.find(table, &id)
            .await?
            .ok_or_else(|| RepoError::Database(format!("Failed to create {} record", table)))
    }
}
