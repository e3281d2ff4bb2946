pub mod behavior_summary;
pub mod care_team;
pub mod data_freshness;
pub mod hashtag_insights;
pub mod journal_entry;
pub mod list_children;
pub mod medication_insights;
pub mod search_journal;
pub mod select_child;

use std::sync::Arc;

use serde_json::Value;

use sprig_core::errors::ToolError;
use sprig_core::service::{DataService, ServiceError, TimeWindow};
use sprig_core::update::UpdateNotifier;
use sprig_store::SessionStore;

use crate::registry::{RegistryConfig, ToolRegistry};

/// Extract a required string argument, failing before any I/O.
pub(crate) fn require_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidArguments(format!("{key} is required")))
}

/// Parse the optional reporting window, defaulting to the past week.
pub(crate) fn window_arg(args: &Value) -> Result<TimeWindow, ToolError> {
    match args.get("window").and_then(Value::as_str) {
        None => Ok(TimeWindow::Week),
        Some(s) => s.parse().map_err(ToolError::InvalidArguments),
    }
}

/// JSON-Schema fragment shared by every window-taking tool.
pub(crate) fn window_property() -> Value {
    serde_json::json!({
        "type": "string",
        "enum": ["week", "month", "quarter"],
        "description": "Reporting window (defaults to 'week')"
    })
}

/// Re-surface a service denial with a caller-actionable hint instead of
/// the raw transport message; everything else propagates unchanged.
pub(crate) fn permission_hint(error: ServiceError, subject: &str) -> ToolError {
    match error {
        ServiceError::Forbidden(_) => ToolError::PermissionDenied(format!(
            "Access to {subject}'s data was denied. Ask the account owner to confirm sharing is still active, then try again."
        )),
        other => ToolError::Service(other),
    }
}

/// Static tool manifest. Every tool is enumerated here at compile time;
/// the child-switching tool is the only conditionally registered one.
pub fn build_registry(
    store: Arc<SessionStore>,
    service: Arc<dyn DataService>,
    notifier: Arc<dyn UpdateNotifier>,
    config: RegistryConfig,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new(Arc::clone(&store), notifier);

    // Roster & selection
    registry.register(Arc::new(list_children::ListChildrenTool::new(
        Arc::clone(&store),
        Arc::clone(&service),
    )));
    if config.allow_child_switching {
        registry.register(Arc::new(select_child::SelectChildTool::new(
            Arc::clone(&store),
            Arc::clone(&service),
        )));
    }

    // Child-scoped insights
    registry.register(Arc::new(behavior_summary::BehaviorSummaryTool::new(
        Arc::clone(&service),
    )));
    registry.register(Arc::new(data_freshness::DataFreshnessTool::new(
        Arc::clone(&service),
    )));
    registry.register(Arc::new(search_journal::SearchJournalTool::new(
        Arc::clone(&service),
    )));
    registry.register(Arc::new(journal_entry::JournalEntryTool::new(
        Arc::clone(&service),
    )));
    registry.register(Arc::new(hashtag_insights::HashtagInsightsTool::new(
        Arc::clone(&service),
    )));
    registry.register(Arc::new(medication_insights::MedicationInsightsTool::new(
        Arc::clone(&service),
    )));
    registry.register(Arc::new(care_team::CareTeamTool::new(service)));

    registry
}
