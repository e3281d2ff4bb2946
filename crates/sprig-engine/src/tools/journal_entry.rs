use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::ids::EntryId;
use sprig_core::service::DataService;
use sprig_core::tools::{Tool, ToolContext};

use crate::reshape::{journal, no_data};
use crate::tools::{permission_hint, require_str};

/// One journal entry in full, with qualitative score labels.
pub struct JournalEntryTool {
    service: Arc<dyn DataService>,
}

impl JournalEntryTool {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for JournalEntryTool {
    fn name(&self) -> &str {
        "get_journal_entry"
    }

    fn description(&self) -> &str {
        "Fetch one journal entry by id, with detail, significance, crisis and strategy annotations"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["entry_id"],
            "properties": {
                "entry_id": {
                    "type": "string",
                    "description": "Entry id from search_journal results"
                }
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let entry_id = EntryId::from_raw(require_str(&args, "entry_id")?);
        let child = ctx.require_child()?;

        let payload = self
            .service
            .fetch_entry(&child.id, &entry_id)
            .await
            .map_err(|e| permission_hint(e, &child.name))?;

        Ok(match payload {
            Some(raw) => journal::entry_detail(&raw, &child.name),
            None => no_data(format!(
                "Journal entry {entry_id} was not found for {}.",
                child.name
            )),
        })
    }
}
