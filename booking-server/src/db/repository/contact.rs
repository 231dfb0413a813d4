//! Contact Repository

use super::{BaseRepository, RepoResult};
use shared::models::{ContactCreate, ContactMessage};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "contact";

#[derive(Clone)]
pub struct ContactRepository {
    base: BaseRepository,
}

impl ContactRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: ContactCreate) -> RepoResult<ContactMessage> {
        self.base.insert(TABLE, data).await
    }
}
