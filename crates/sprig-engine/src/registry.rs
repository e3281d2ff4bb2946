use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use sprig_core::errors::ToolError;
use sprig_core::ids::SessionId;
use sprig_core::tools::{Execution, Timing, Tool, ToolContext, ToolDefinition};
use sprig_core::update::UpdateNotifier;
use sprig_store::SessionStore;

/// Runtime configuration for the dispatch registry.
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Embedded deployments pin the session to one child and do not
    /// expose the switching tool.
    pub allow_child_switching: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allow_child_switching: true,
        }
    }
}

/// One call in a batch request.
#[derive(Clone, Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// Per-call outcome of a batch. A failing call never aborts its siblings.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Execution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Registry of available tools plus the dispatch surface over them.
/// Tools are registered once at startup from the static manifest in
/// `crate::tools::build_registry`; registration order is preserved.
pub struct ToolRegistry {
    store: Arc<SessionStore>,
    notifier: Arc<dyn UpdateNotifier>,
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(store: Arc<SessionStore>, notifier: Arc<dyn UpdateNotifier>) -> Self {
        Self {
            store,
            notifier,
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Last registration wins on a name collision.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&i) => self.tools[i] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Public descriptors in registration order, handlers excluded.
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Dispatch one tool call for a session. Session reads deliberately
    /// extend the session's lifetime via `touch`. Errors are logged with
    /// tool name and duration, then forwarded unchanged; translation is
    /// each handler's job.
    #[instrument(skip(self, args), fields(tool = name, session_id = %session_id))]
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        session_id: &SessionId,
    ) -> Result<Execution, ToolError> {
        let tool = self
            .index
            .get(name)
            .map(|&i| Arc::clone(&self.tools[i]))
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;

        self.store.touch(session_id)?;
        let session = self.store.get(session_id)?;
        let ctx = ToolContext {
            session_id: session.id,
            caller_id: session.caller_id,
            selected_child: session.selected_child,
        };

        let start = Instant::now();
        let result = tool.execute(args, &ctx).await;
        let duration = start.elapsed();

        match result {
            Ok(value) => {
                info!(duration_ms = duration.as_millis() as u64, "tool call ok");
                Ok(Execution {
                    result: self.apply_update_notice(value),
                    timing: Timing { duration },
                })
            }
            Err(e) => {
                if e.is_expected() {
                    info!(
                        duration_ms = duration.as_millis() as u64,
                        kind = e.error_kind(),
                        "tool call rejected"
                    );
                } else {
                    error!(
                        duration_ms = duration.as_millis() as u64,
                        kind = e.error_kind(),
                        error = %e,
                        "tool call failed"
                    );
                }
                Err(e)
            }
        }
    }

    /// Run calls strictly in sequence, capturing each outcome
    /// independently. The batch itself never fails.
    pub async fn execute_batch(
        &self,
        calls: Vec<ToolCall>,
        session_id: &SessionId,
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(calls.len());
        for call in calls {
            let outcome = match self.execute(&call.name, call.args, session_id).await {
                Ok(execution) => BatchOutcome {
                    name: call.name,
                    success: true,
                    result: Some(execution),
                    error: None,
                },
                Err(e) => BatchOutcome {
                    name: call.name,
                    success: false,
                    result: None,
                    error: Some(e.to_string()),
                },
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Append a pending-update notice to a successful result without
    /// altering any other field.
    fn apply_update_notice(&self, result: Value) -> Value {
        let Some(notice) = self.notifier.pending_update_notice() else {
            return result;
        };
        match result {
            Value::String(s) => Value::String(format!("{s}\n\n{notice}")),
            Value::Object(mut map) => {
                map.insert("update_notice".into(), Value::String(notice));
                Value::Object(map)
            }
            other => other,
        }
    }
}
