use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::debug;

use crate::entities::part::{ActiveModel as PartActiveModel, Column, Entity as Parts};
use crate::errors::{ServiceError, ServiceResult};
use crate::models::Part;
use crate::repositories::{new_part_id, PartRepository, Repository};

/// Part repository backed by a sea-orm connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePartRepository {
    db: Arc<DatabaseConnection>,
}

impl DatabasePartRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn exists(&self, id: &str) -> ServiceResult<bool> {
        Ok(Parts::find_by_id(id.to_string())
            .one(self.get_db())
            .await?
            .is_some())
    }
}

impl Repository for DatabasePartRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl PartRepository for DatabasePartRepository {
    async fn by_id(&self, id: &str) -> ServiceResult<Part> {
        Parts::find_by_id(id.to_string())
            .one(self.get_db())
            .await?
            .map(Part::from)
            .ok_or_else(|| ServiceError::part_not_found(id))
    }

    async fn create(&self) -> ServiceResult<Part> {
        let mut id = new_part_id();
        while self.exists(&id).await? {
            id = new_part_id();
        }
        Ok(Part::new(id))
    }

    async fn store(&self, part: &Part) -> ServiceResult<()> {
        let now = Utc::now();
        let mut active = PartActiveModel::from_part(part);
        active.created_at = Set(now);
        active.updated_at = Set(now);

        // Single upsert. created_at is not in the update list and keeps its
        // first value.
        Parts::insert(active)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Reference,
                        Column::Weight,
                        Column::Quantity,
                        Column::Location,
                        Column::Supplier,
                        Column::Dimensions,
                        Column::Status,
                        Column::ArrivalDate,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.get_db())
            .await?;
        debug!(part_id = %part.id(), "Part stored");
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> ServiceResult<()> {
        let result = Parts::delete_by_id(id.to_string())
            .exec(self.get_db())
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::part_not_found(id));
        }
        Ok(())
    }

    async fn all(&self) -> ServiceResult<Vec<Part>> {
        let rows = Parts::find()
            .order_by_asc(Column::Reference)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?;
        Ok(rows.into_iter().map(Part::from).collect())
    }

    async fn ping(&self) -> ServiceResult<()> {
        self.get_db().ping().await?;
        Ok(())
    }
}
