use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::{DataService, Page};
use sprig_core::tools::{Tool, ToolContext};

use crate::reshape::journal;
use crate::tools::{permission_hint, require_str};

const MAX_LIMIT: u64 = 200;
const DEFAULT_LIMIT: u64 = 50;

/// Full-text search over the selected child's journal.
pub struct SearchJournalTool {
    service: Arc<dyn DataService>,
}

impl SearchJournalTool {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SearchJournalTool {
    fn name(&self) -> &str {
        "search_journal"
    }

    fn description(&self) -> &str {
        "Search the selected child's journal entries by text; results are capped at 100 per call"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["query"],
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to search for"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_LIMIT,
                    "description": "Max results to request (default 50)"
                },
                "offset": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Results to skip for pagination"
                }
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let query = require_str(&args, "query")?;
        if query.trim().is_empty() {
            return Err(ToolError::InvalidArguments("query must not be empty".into()));
        }
        let limit = args.get("limit").and_then(Value::as_u64).unwrap_or(DEFAULT_LIMIT);
        if limit == 0 || limit > MAX_LIMIT {
            return Err(ToolError::InvalidArguments(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        let offset = args.get("offset").and_then(Value::as_u64).unwrap_or(0);
        let child = ctx.require_child()?;

        let payload = self
            .service
            .search(
                &child.id,
                query,
                Page {
                    limit: limit as u32,
                    offset: offset as u32,
                },
            )
            .await
            .map_err(|e| permission_hint(e, &child.name))?;

        Ok(journal::search_results(&payload, &child.name, query))
    }
}
