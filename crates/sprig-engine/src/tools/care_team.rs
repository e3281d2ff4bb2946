use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::{Category, DataService, TimeWindow};
use sprig_core::tools::{Tool, ToolContext};

use crate::reshape::{no_data, roster};
use crate::tools::permission_hint;

/// Everyone with access to the selected child's data. The roster is not
/// windowed; the widest window covers activity counts.
pub struct CareTeamTool {
    service: Arc<dyn DataService>,
}

impl CareTeamTool {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CareTeamTool {
    fn name(&self) -> &str {
        "list_care_team"
    }

    fn description(&self) -> &str {
        "List the caregivers and professionals linked to the selected child, most active first"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let child = ctx.require_child()?;

        let payload = self
            .service
            .fetch_category(&child.id, TimeWindow::Quarter, Category::CareTeam)
            .await
            .map_err(|e| permission_hint(e, &child.name))?;

        Ok(match payload {
            Some(raw) => roster::care_team(&raw, &child.name),
            None => no_data(format!("No care-team members are linked to {}.", child.name)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_client::MockDataService;
    use sprig_core::ids::{CallerId, ChildId, SessionId};
    use sprig_core::tools::ChildSelection;

    fn ctx_with_child() -> ToolContext {
        ToolContext {
            session_id: SessionId::new(),
            caller_id: CallerId::from_raw("u1"),
            selected_child: Some(ChildSelection {
                id: ChildId::from_raw("c1"),
                name: "Ada".into(),
            }),
        }
    }

    #[tokio::test]
    async fn lists_members_in_precedence_order() {
        let mock = MockDataService::new().with_category(
            &ChildId::from_raw("c1"),
            Category::CareTeam,
            json!({"members": [
                {"name": "Grandpa", "role": "family", "status": "pending", "entries_logged": 0},
                {"name": "Dr. Reyes", "role": "clinician", "status": "accepted", "entries_logged": 21},
            ]}),
        );
        let tool = CareTeamTool::new(Arc::new(mock));
        let out = tool.execute(json!({}), &ctx_with_child()).await.unwrap();
        assert_eq!(out["members"][0]["name"], json!("Dr. Reyes"));
        assert_eq!(out["members"][1]["name"], json!("Grandpa"));
        assert_eq!(out["count"], json!(2));
    }

    #[tokio::test]
    async fn absent_payload_is_soft_no_data() {
        let tool = CareTeamTool::new(Arc::new(MockDataService::new()));
        let out = tool.execute(json!({}), &ctx_with_child()).await.unwrap();
        assert_eq!(out["no_data"], json!(true));
    }

    #[tokio::test]
    async fn requires_a_selected_child() {
        let tool = CareTeamTool::new(Arc::new(MockDataService::new()));
        let mut ctx = ctx_with_child();
        ctx.selected_child = None;
        let err = tool.execute(json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::NoChildSelected));
    }
}
