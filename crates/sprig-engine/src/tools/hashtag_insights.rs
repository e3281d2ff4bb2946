use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::{Category, DataService};
use sprig_core::tools::{Tool, ToolContext};

use crate::reshape::{hashtags, no_data};
use crate::tools::{permission_hint, window_arg, window_property};

/// Hashtag associations for the selected child, strongest first.
pub struct HashtagInsightsTool {
    service: Arc<dyn DataService>,
}

impl HashtagInsightsTool {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for HashtagInsightsTool {
    fn name(&self) -> &str {
        "get_hashtag_insights"
    }

    fn description(&self) -> &str {
        "Rank the hashtags most and least associated with the selected child's good days, as one ordered list"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "window": window_property()
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let window = window_arg(&args)?;
        let child = ctx.require_child()?;

        let payload = self
            .service
            .fetch_category(&child.id, window, Category::Hashtags)
            .await
            .map_err(|e| permission_hint(e, &child.name))?;

        Ok(match payload {
            Some(raw) => hashtags::hashtag_insights(&raw, &child.name, window),
            None => no_data(format!(
                "No hashtag activity is available for {} in the past {window}.",
                child.name
            )),
        })
    }
}
