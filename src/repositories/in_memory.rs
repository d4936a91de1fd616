use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::errors::{ServiceError, ServiceResult};
use crate::models::Part;
use crate::repositories::{new_part_id, PartRepository};

/// Part repository held in process memory. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPartRepository {
    parts: Arc<DashMap<String, Part>>,
}

impl InMemoryPartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `parts`.
    pub fn with_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let repo = Self::new();
        for part in parts {
            repo.parts.insert(part.id().to_string(), part);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[async_trait]
impl PartRepository for InMemoryPartRepository {
    async fn by_id(&self, id: &str) -> ServiceResult<Part> {
        self.parts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ServiceError::part_not_found(id))
    }

    async fn create(&self) -> ServiceResult<Part> {
        let mut id = new_part_id();
        while self.parts.contains_key(&id) {
            id = new_part_id();
        }
        Ok(Part::new(id))
    }

    async fn store(&self, part: &Part) -> ServiceResult<()> {
        self.parts.insert(part.id().to_string(), part.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> ServiceResult<()> {
        self.parts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::part_not_found(id))
    }

    async fn all(&self) -> ServiceResult<Vec<Part>> {
        let mut parts: Vec<Part> = self.parts.iter().map(|e| e.value().clone()).collect();
        parts.sort_by(|a, b| {
            a.reference
                .cmp(&b.reference)
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(parts)
    }
}
