use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::DataService;
use sprig_core::tools::{Tool, ToolContext};
use sprig_store::SessionStore;

use crate::tools::list_children::roster_for;
use crate::tools::require_str;

/// Scope the session to one child. Only registered in free mode;
/// embedded deployments keep the session pinned to its initial child.
pub struct SelectChildTool {
    store: Arc<SessionStore>,
    service: Arc<dyn DataService>,
}

impl SelectChildTool {
    pub fn new(store: Arc<SessionStore>, service: Arc<dyn DataService>) -> Self {
        Self { store, service }
    }
}

#[async_trait]
impl Tool for SelectChildTool {
    fn name(&self) -> &str {
        "select_child"
    }

    fn description(&self) -> &str {
        "Select which child the rest of the conversation is about. Required before any child-scoped tool."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["child_id"],
            "properties": {
                "child_id": {
                    "type": "string",
                    "description": "Id from list_children"
                }
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let child_id = require_str(&args, "child_id")?;

        let roster = roster_for(&self.store, self.service.as_ref(), ctx).await?;
        let child = roster
            .iter()
            .find(|c| c.id.as_str() == child_id)
            .ok_or_else(|| {
                ToolError::InvalidArguments(format!(
                    "unknown child id: {child_id} (use list_children to see valid ids)"
                ))
            })?;

        self.store
            .set_selected_child(&ctx.session_id, child.id.clone(), child.display_name.as_str())?;
        Ok(Value::String(format!(
            "Now viewing data for {}.",
            child.display_name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_client::MockDataService;
    use sprig_core::ids::{CallerId, ChildId};
    use sprig_core::service::ChildRef;

    fn setup() -> (Arc<SessionStore>, ToolContext, SelectChildTool) {
        let store = Arc::new(SessionStore::new());
        let session = store.create(&CallerId::from_raw("u1"));
        let ctx = ToolContext {
            session_id: session.id,
            caller_id: session.caller_id,
            selected_child: None,
        };
        let mock = MockDataService::new().with_children(vec![ChildRef {
            id: ChildId::from_raw("c1"),
            display_name: "Child One".into(),
        }]);
        let tool = SelectChildTool::new(Arc::clone(&store), Arc::new(mock));
        (store, ctx, tool)
    }

    #[tokio::test]
    async fn selects_a_known_child() {
        let (store, ctx, tool) = setup();
        let out = tool
            .execute(json!({"child_id": "c1"}), &ctx)
            .await
            .unwrap();
        assert_eq!(out, json!("Now viewing data for Child One."));

        let selection = store.selected_child(&ctx.session_id).unwrap();
        assert_eq!(selection.id.as_str(), "c1");
        assert_eq!(selection.name, "Child One");
    }

    #[tokio::test]
    async fn rejects_unknown_child_id() {
        let (store, ctx, tool) = setup();
        let err = tool
            .execute(json!({"child_id": "c9"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(ref m) if m.contains("c9")));
        assert!(store.selected_child(&ctx.session_id).is_err());
    }

    #[tokio::test]
    async fn rejects_missing_argument_before_io() {
        let (_store, ctx, tool) = setup();
        let err = tool.execute(json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
