use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::{Category, DataService};
use sprig_core::tools::{Tool, ToolContext};

use crate::reshape::{freshness, no_data};
use crate::tools::{permission_hint, window_arg, window_property};

/// How current the selected child's tracked data is.
pub struct DataFreshnessTool {
    service: Arc<dyn DataService>,
}

impl DataFreshnessTool {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DataFreshnessTool {
    fn name(&self) -> &str {
        "get_data_freshness"
    }

    fn description(&self) -> &str {
        "Report when the selected child's data was last updated and how far behind it is"
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
            .fetch_category(&child.id, window, Category::Freshness)
            .await
            .map_err(|e| permission_hint(e, &child.name))?;

        Ok(match payload {
            Some(raw) => freshness::freshness_report(&raw, &child.name, window, Utc::now()),
            None => no_data(format!(
                "No entry history is available for {} in the past {window}.",
                child.name
            )),
        })
    }
}
