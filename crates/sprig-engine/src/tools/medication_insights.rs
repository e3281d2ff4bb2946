use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::{Category, DataService};
use sprig_core::tools::{Tool, ToolContext};

use crate::reshape::{medications, no_data};
use crate::tools::{permission_hint, window_arg, window_property};

/// Medication log summary for the selected child.
pub struct MedicationInsightsTool {
    service: Arc<dyn DataService>,
}

impl MedicationInsightsTool {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for MedicationInsightsTool {
    fn name(&self) -> &str {
        "get_medication_insights"
    }

    fn description(&self) -> &str {
        "Summarize the selected child's logged medications with average observed effect"
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
            .fetch_category(&child.id, window, Category::Medications)
            .await
            .map_err(|e| permission_hint(e, &child.name))?;

        Ok(match payload {
            Some(raw) => medications::medication_insights(&raw, &child.name, window),
            None => no_data(format!(
                "No medication data is available for {} in the past {window}.",
                child.name
            )),
        })
    }
}
