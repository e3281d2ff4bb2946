use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ToolError;
use crate::ids::{CallerId, ChildId, SessionId};

/// The child a session is currently scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSelection {
    pub id: ChildId,
    pub name: String,
}

/// Session snapshot available to tools during execution.
#[derive(Clone, Debug)]
pub struct ToolContext {
    pub session_id: SessionId,
    pub caller_id: CallerId,
    pub selected_child: Option<ChildSelection>,
}

impl ToolContext {
    /// Enforcement point for child-scoped tools: a selection must exist
    /// before any of them can run.
    pub fn require_child(&self) -> Result<ChildSelection, ToolError> {
        self.selected_child
            .clone()
            .ok_or(ToolError::NoChildSelected)
    }
}

/// Tool definition sent to the calling agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Successful execution envelope: the tool's result plus timing metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Execution {
    pub result: serde_json::Value,
    pub timing: Timing,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Timing {
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

/// Trait implemented by each tool.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> serde_json::Value;

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Serde helper for Duration as milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}
