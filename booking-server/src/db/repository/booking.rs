//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Booking, BookingCreate, BookingStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All bookings in creation order
    pub async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        self.base.list(TABLE).await
    }

    /// Find booking by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        self.base.find(TABLE, id).await
    }

    /// Create a booking; `status` is left unset (reads back as Active)
    pub async fn create(&self, data: BookingCreate) -> RepoResult<Booking> {
        self.base.insert(TABLE, data).await
    }

    /// Overwrite the status field of an existing booking
    pub async fn set_status(&self, id: &str, status: BookingStatus) -> RepoResult<Booking> {
        self.base
            .db()
            .query("UPDATE type::thing($table, $id) SET status = $status")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .bind(("status", status.as_str()))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }
}
