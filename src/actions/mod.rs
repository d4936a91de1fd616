use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::PartRepository;
use crate::views::CONTAINER_SELECTOR;

pub mod parts;

/// A named remote operation invoked from the browser.
///
/// Handlers receive the raw JSON arguments of the call and decode them
/// themselves, so a malformed payload surfaces as a deserialization error.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn execute(&self, args: Value) -> ServiceResult<ActionResult>;
}

/// Body of `POST /guiapi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// UI patch returned by an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Replace the inner markup of the element matching `selector`.
    Replace { selector: String, content: String },
    /// Navigate the browser to `url`.
    Redirect(String),
}

impl ActionResult {
    /// Replace the page container with `content`.
    pub fn container(content: impl ToString) -> Self {
        ActionResult::Replace {
            selector: CONTAINER_SELECTOR.to_string(),
            content: content.to_string(),
        }
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        ActionResult::Redirect(url.into())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HtmlOperation {
    pub operation: String,
    pub selector: String,
    pub content: String,
}

/// Wire form of an [`ActionResult`].
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ActionResponse {
    Html { html: Vec<HtmlOperation> },
    Redirect { redirect: String },
}

impl From<ActionResult> for ActionResponse {
    fn from(result: ActionResult) -> Self {
        match result {
            ActionResult::Replace { selector, content } => ActionResponse::Html {
                html: vec![HtmlOperation {
                    operation: "replace".to_string(),
                    selector,
                    content,
                }],
            },
            ActionResult::Redirect(redirect) => ActionResponse::Redirect { redirect },
        }
    }
}

/// Dispatch table from action name to handler, built once at startup.
pub struct ActionRegistry {
    handlers: HashMap<&'static str, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry holding every part action, all sharing `parts`.
    pub fn new(parts: Arc<dyn PartRepository>) -> Self {
        let mut registry = Self::empty();
        registry
            .register("editPart", parts::EditPart::new(parts.clone()))
            .register("savePart", parts::SavePart::new(parts.clone()))
            .register("deletePart", parts::DeletePart::new(parts.clone()))
            .register("prepareTruck", parts::PrepareTruck::new(parts.clone()))
            .register("ship", parts::Ship::new(parts.clone()))
            .register("viewPart", parts::ViewPart::new(parts.clone()))
            .register("newPart", parts::NewPart);
        registry
    }

    pub fn register(
        &mut self,
        name: &'static str,
        handler: impl ActionHandler + 'static,
    ) -> &mut Self {
        self.handlers.insert(name, Arc::new(handler));
        self
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub async fn dispatch(&self, name: &str, args: Value) -> ServiceResult<ActionResult> {
        let handler = self.handlers.get(name).cloned().ok_or_else(|| {
            warn!(action = %name, "Unknown action requested");
            counter!("guiapi.actions.unknown", 1);
            ServiceError::UnknownAction(name.to_string())
        })?;

        debug!(action = %name, "Dispatching action");
        counter!("guiapi.actions.dispatched", 1, "action" => name.to_string());

        handler.execute(args).await.map_err(|e| {
            warn!(action = %name, error = %e, "Action failed");
            counter!("guiapi.actions.failed", 1, "action" => name.to_string());
            e
        })
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}
