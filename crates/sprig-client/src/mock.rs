use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use sprig_core::ids::{CallerId, ChildId, EntryId};
use sprig_core::service::{
    Category, ChildRef, DataService, Page, SearchPayload, ServiceError, TimeWindow,
};

/// Pre-programmed data service for deterministic testing without HTTP.
/// Configure responses with the builder methods, then hand it to the
/// registry behind an `Arc<dyn DataService>`.
#[derive(Default)]
pub struct MockDataService {
    children: Vec<ChildRef>,
    categories: HashMap<(String, &'static str), serde_json::Value>,
    entries: HashMap<String, serde_json::Value>,
    search: Option<SearchPayload>,
    fail_with: Option<ServiceError>,
    call_count: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl MockDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, children: Vec<ChildRef>) -> Self {
        self.children = children;
        self
    }

    pub fn with_category(
        mut self,
        child: &ChildId,
        category: Category,
        payload: serde_json::Value,
    ) -> Self {
        self.categories
            .insert((child.as_str().to_string(), category.as_str()), payload);
        self
    }

    pub fn with_entry(mut self, entry: &EntryId, payload: serde_json::Value) -> Self {
        self.entries.insert(entry.as_str().to_string(), payload);
        self
    }

    pub fn with_search(mut self, results: Vec<serde_json::Value>, total: u64) -> Self {
        self.search = Some(SearchPayload {
            results,
            pagination: sprig_core::service::Pagination {
                total,
                limit: 50,
                offset: 0,
            },
        });
        self
    }

    /// Every subsequent call fails with this error.
    pub fn failing_with(mut self, error: ServiceError) -> Self {
        self.fail_with = Some(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Endpoint names in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, endpoint: &str) -> Result<(), ServiceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls.lock().push(endpoint.to_string());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataService for MockDataService {
    async fn fetch_children(&self, _caller: &CallerId) -> Result<Vec<ChildRef>, ServiceError> {
        self.record("fetch_children")?;
        Ok(self.children.clone())
    }

    async fn fetch_category(
        &self,
        child: &ChildId,
        _window: TimeWindow,
        category: Category,
    ) -> Result<Option<serde_json::Value>, ServiceError> {
        self.record("fetch_category")?;
        Ok(self
            .categories
            .get(&(child.as_str().to_string(), category.as_str()))
            .cloned())
    }

    async fn fetch_entry(
        &self,
        _child: &ChildId,
        entry: &EntryId,
    ) -> Result<Option<serde_json::Value>, ServiceError> {
        self.record("fetch_entry")?;
        Ok(self.entries.get(entry.as_str()).cloned())
    }

    async fn search(
        &self,
        _child: &ChildId,
        _query: &str,
        _page: Page,
    ) -> Result<SearchPayload, ServiceError> {
        self.record("search")?;
        Ok(self.search.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_configured_children() {
        let mock = MockDataService::new().with_children(vec![ChildRef {
            id: ChildId::from_raw("c1"),
            display_name: "Child One".into(),
        }]);

        let children = mock.fetch_children(&CallerId::from_raw("u1")).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls(), vec!["fetch_children"]);
    }

    #[tokio::test]
    async fn unconfigured_category_is_absent_data() {
        let mock = MockDataService::new();
        let payload = mock
            .fetch_category(&ChildId::from_raw("c1"), TimeWindow::Week, Category::Behavior)
            .await
            .unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn configured_category_round_trips() {
        let child = ChildId::from_raw("c1");
        let mock = MockDataService::new().with_category(
            &child,
            Category::Behavior,
            json!({"days": []}),
        );
        let payload = mock
            .fetch_category(&child, TimeWindow::Month, Category::Behavior)
            .await
            .unwrap();
        assert_eq!(payload, Some(json!({"days": []})));
    }

    #[tokio::test]
    async fn failure_injection_applies_to_every_call() {
        let mock =
            MockDataService::new().failing_with(ServiceError::Forbidden("denied".into()));
        let result = mock.fetch_children(&CallerId::from_raw("u1")).await;
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));

        let result = mock
            .search(&ChildId::from_raw("c1"), "park", Page::default())
            .await;
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
        assert_eq!(mock.call_count(), 2);
    }
}
