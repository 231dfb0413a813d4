//! Database Module
//!
//! Handles the embedded SurrealDB document store

pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "travel";
const DATABASE: &str = "bookings";

/// Collections are schemaless: form payloads are stored as submitted.
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS booking_created ON booking FIELDS createdAt;
    DEFINE TABLE IF NOT EXISTS contact SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS hotel SCHEMALESS;
";

/// Database service: owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) a RocksDB-backed store at `path`
    pub async fn rocksdb(path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!(path = %path.display(), "Database connection established (RocksDB)");
        Self::prepare(db).await
    }

    /// In-memory store; contents vanish with the process
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!("Database connection established (memory)");
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        tracing::info!("Database schema ready");

        Ok(Self { db })
    }
}
