//! Actions operating on part records.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::actions::{ActionHandler, ActionResult};
use crate::errors::ServiceResult;
use crate::models::{SavePartInput, STATUS_PREPARING_TRUCK, STATUS_SHIPPED};
use crate::repositories::PartRepository;
use crate::views::{render_edit, render_view};

/// Decodes an argument payload holding a single part id.
fn part_id(args: Value) -> ServiceResult<String> {
    Ok(serde_json::from_value(args)?)
}

/// Loads the part named by `args`, sets its status and redirects to the list.
async fn set_status(
    parts: &dyn PartRepository,
    args: Value,
    status: &str,
) -> ServiceResult<ActionResult> {
    let id = part_id(args)?;
    let mut part = parts.by_id(&id).await?;
    part.status = status.to_string();
    parts.store(&part).await?;
    info!(part_id = %id, status = %status, "Part status changed");
    Ok(ActionResult::redirect("/"))
}

pub struct EditPart {
    parts: Arc<dyn PartRepository>,
}

impl EditPart {
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl ActionHandler for EditPart {
    #[instrument(skip(self))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        let id = part_id(args)?;
        let part = self.parts.by_id(&id).await?;
        Ok(ActionResult::container(render_edit(Some(&part), "")?))
    }
}

pub struct ViewPart {
    parts: Arc<dyn PartRepository>,
}

impl ViewPart {
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl ActionHandler for ViewPart {
    #[instrument(skip(self))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        let id = part_id(args)?;
        let part = self.parts.by_id(&id).await?;
        Ok(ActionResult::container(render_view(&part)?))
    }
}

/// Blank edit form, optionally with the reference filled in from a scan.
pub struct NewPart;

#[async_trait]
impl ActionHandler for NewPart {
    #[instrument(skip(self))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        let code: Option<String> = serde_json::from_value(args)?;
        Ok(ActionResult::container(render_edit(
            None,
            code.as_deref().unwrap_or_default(),
        )?))
    }
}

pub struct SavePart {
    parts: Arc<dyn PartRepository>,
}

impl SavePart {
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl ActionHandler for SavePart {
    #[instrument(skip(self, args))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        let input: SavePartInput = serde_json::from_value(args)?;
        let changes = input.parse()?;

        let mut part = if input.is_new() {
            self.parts.create().await?
        } else {
            self.parts.by_id(&input.id).await?
        };

        let stamp_arrival = input.is_new() && changes.arrival_date.is_none();
        changes.apply_to(&mut part);
        if stamp_arrival {
            part.arrival_date = Utc::now();
        }
        part.validate()?;

        self.parts.store(&part).await?;
        info!(part_id = %part.id(), new = input.is_new(), "Part saved");

        Ok(ActionResult::container(render_view(&part)?))
    }
}

pub struct DeletePart {
    parts: Arc<dyn PartRepository>,
}

impl DeletePart {
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl ActionHandler for DeletePart {
    #[instrument(skip(self))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        let id = part_id(args)?;
        self.parts.delete_by_id(&id).await?;
        info!(part_id = %id, "Part deleted");
        Ok(ActionResult::redirect("/"))
    }
}

pub struct PrepareTruck {
    parts: Arc<dyn PartRepository>,
}

impl PrepareTruck {
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl ActionHandler for PrepareTruck {
    #[instrument(skip(self))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        set_status(self.parts.as_ref(), args, STATUS_PREPARING_TRUCK).await
    }
}

pub struct Ship {
    parts: Arc<dyn PartRepository>,
}

impl Ship {
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl ActionHandler for Ship {
    #[instrument(skip(self))]
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult> {
        set_status(self.parts.as_ref(), args, STATUS_SHIPPED).await
    }
}
