//! Hotel Reservation Repository

use super::{BaseRepository, RepoResult};
use shared::models::{HotelReservation, HotelReservationCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "hotel";

#[derive(Clone)]
pub struct HotelRepository {
    base: BaseRepository,
}

impl HotelRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: HotelReservationCreate) -> RepoResult<HotelReservation> {
        self.base.insert(TABLE, data).await
    }
}
