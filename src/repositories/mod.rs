use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceResult;
use crate::models::Part;

pub mod in_memory;
pub mod part_repository;

pub use in_memory::InMemoryPartRepository;
pub use part_repository::DatabasePartRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

/// Storage for part records. The repository owns the canonical copy of
/// every part; callers work on the values it hands out and write them back
/// with [`PartRepository::store`].
#[async_trait]
pub trait PartRepository: Send + Sync {
    /// Loads a part, failing with `NotFound` for an unknown id.
    async fn by_id(&self, id: &str) -> ServiceResult<Part>;

    /// Allocates a blank part with a fresh identifier. Nothing is persisted
    /// until the part is stored.
    async fn create(&self) -> ServiceResult<Part>;

    /// Inserts or overwrites the part with the same id. Last write wins.
    async fn store(&self, part: &Part) -> ServiceResult<()>;

    /// Removes a part, failing with `NotFound` for an unknown id.
    async fn delete_by_id(&self, id: &str) -> ServiceResult<()>;

    /// Every stored part ordered by reference.
    async fn all(&self) -> ServiceResult<Vec<Part>>;

    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> ServiceResult<()> {
        Ok(())
    }
}

pub(crate) fn new_part_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
