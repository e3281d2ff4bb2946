use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sprig_core::errors::ToolError;
use sprig_core::service::{ChildRef, DataService};
use sprig_core::tools::{Tool, ToolContext};
use sprig_store::SessionStore;

use crate::reshape::no_data;
use crate::tools::permission_hint;

/// Roster of children visible to the caller. The roster is fetched once
/// per session and cached; later calls serve from the cache.
pub struct ListChildrenTool {
    store: Arc<SessionStore>,
    service: Arc<dyn DataService>,
}

impl ListChildrenTool {
    pub fn new(store: Arc<SessionStore>, service: Arc<dyn DataService>) -> Self {
        Self { store, service }
    }
}

/// Serve the session's cached roster, populating it lazily on first use.
pub(crate) async fn roster_for(
    store: &SessionStore,
    service: &dyn DataService,
    ctx: &ToolContext,
) -> Result<Vec<ChildRef>, ToolError> {
    let session = store.get(&ctx.session_id)?;
    if let Some(cached) = session.children_cache {
        return Ok(cached);
    }
    let fetched = service
        .fetch_children(&ctx.caller_id)
        .await
        .map_err(|e| permission_hint(e, "this account"))?;
    store.cache_children(&ctx.session_id, fetched.clone())?;
    Ok(fetched)
}

#[async_trait]
impl Tool for ListChildrenTool {
    fn name(&self) -> &str {
        "list_children"
    }

    fn description(&self) -> &str {
        "List the children this account can view, with the ids used to select one"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let roster = roster_for(&self.store, self.service.as_ref(), ctx).await?;
        if roster.is_empty() {
            return Ok(no_data("No children are linked to this account."));
        }
        let children: Vec<Value> = roster
            .iter()
            .map(|c| json!({"id": c.id, "name": c.display_name}))
            .collect();
        Ok(json!({
            "count": children.len(),
            "children": children,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_client::MockDataService;
    use sprig_core::ids::{CallerId, ChildId};
    use sprig_core::service::ServiceError;

    fn child(id: &str, name: &str) -> ChildRef {
        ChildRef {
            id: ChildId::from_raw(id),
            display_name: name.into(),
        }
    }

    fn setup(mock: MockDataService) -> (Arc<SessionStore>, Arc<MockDataService>, ToolContext) {
        let store = Arc::new(SessionStore::new());
        let session = store.create(&CallerId::from_raw("u1"));
        let ctx = ToolContext {
            session_id: session.id,
            caller_id: session.caller_id,
            selected_child: None,
        };
        (store, Arc::new(mock), ctx)
    }

    #[tokio::test]
    async fn lists_children_and_caches_roster() {
        let mock = MockDataService::new()
            .with_children(vec![child("c1", "Child One"), child("c2", "Child Two")]);
        let (store, mock, ctx) = setup(mock);
        let tool = ListChildrenTool::new(Arc::clone(&store), mock.clone());

        let out = tool.execute(json!({}), &ctx).await.unwrap();
        assert_eq!(out["count"], json!(2));
        assert_eq!(out["children"][0]["name"], json!("Child One"));

        // Second call is served from the session cache.
        tool.execute(json!({}), &ctx).await.unwrap();
        assert_eq!(mock.call_count(), 1);
        assert!(store
            .get(&ctx.session_id)
            .unwrap()
            .children_cache
            .is_some());
    }

    #[tokio::test]
    async fn empty_roster_is_soft_no_data() {
        let (store, mock, ctx) = setup(MockDataService::new());
        let tool = ListChildrenTool::new(store, mock);
        let out = tool.execute(json!({}), &ctx).await.unwrap();
        assert_eq!(out["no_data"], json!(true));
    }

    #[tokio::test]
    async fn forbidden_becomes_permission_denied_with_hint() {
        let mock = MockDataService::new().failing_with(ServiceError::Forbidden("403".into()));
        let (store, mock, ctx) = setup(mock);
        let tool = ListChildrenTool::new(store, mock);
        let err = tool.execute(json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::PermissionDenied(ref m) if m.contains("sharing")));
    }
}
