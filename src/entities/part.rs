use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::models::Part;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,
    pub reference: String,
    pub weight: f64,
    pub quantity: i64,
    pub location: String,
    pub supplier: String,
    pub dimensions: String,
    pub status: String,
    pub arrival_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Part {
    fn from(model: Model) -> Self {
        let mut part = Part::new(model.id);
        part.reference = model.reference;
        part.weight = model.weight;
        part.quantity = model.quantity;
        part.location = model.location;
        part.supplier = model.supplier;
        part.dimensions = model.dimensions;
        part.status = model.status;
        part.arrival_date = model.arrival_date;
        part
    }
}

impl ActiveModel {
    /// Active model with every domain column set. Timestamps are left for the
    /// repository to fill in.
    pub fn from_part(part: &Part) -> Self {
        Self {
            id: Set(part.id().to_string()),
            reference: Set(part.reference.clone()),
            weight: Set(part.weight),
            quantity: Set(part.quantity),
            location: Set(part.location.clone()),
            supplier: Set(part.supplier.clone()),
            dimensions: Set(part.dimensions.clone()),
            status: Set(part.status.clone()),
            arrival_date: Set(part.arrival_date),
            ..Default::default()
        }
    }
}
