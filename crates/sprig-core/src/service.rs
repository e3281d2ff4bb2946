use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ids::{CallerId, ChildId, EntryId};

/// A child visible to a caller, as reported by the data service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub id: ChildId,
    pub display_name: String,
}

/// Reporting window for category queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Week,
    Month,
    Quarter,
}

impl TimeWindow {
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            other => Err(format!("unknown window: {other}")),
        }
    }
}

/// Data categories the service can report on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Behavior,
    Freshness,
    Hashtags,
    Medications,
    CareTeam,
}

impl Category {
    /// URL path segment used by the data service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Behavior => "behavior",
            Self::Freshness => "freshness",
            Self::Hashtags => "hashtags",
            Self::Medications => "medications",
            Self::CareTeam => "care-team",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination parameters for search.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 50, offset: 0 }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Raw search response from the data service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchPayload {
    pub results: Vec<serde_json::Value>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Classify an HTTP status code into the appropriate error variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Forbidden(body),
            _ => Self::Status { status, body },
        }
    }
}

/// Narrow contract over the remote tracking service. A `None` payload means
/// the service has nothing for that query: absence of data, not an error.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn fetch_children(&self, caller: &CallerId) -> Result<Vec<ChildRef>, ServiceError>;

    async fn fetch_category(
        &self,
        child: &ChildId,
        window: TimeWindow,
        category: Category,
    ) -> Result<Option<serde_json::Value>, ServiceError>;

    async fn fetch_entry(
        &self,
        child: &ChildId,
        entry: &EntryId,
    ) -> Result<Option<serde_json::Value>, ServiceError>;

    async fn search(
        &self,
        child: &ChildId,
        query: &str,
        page: Page,
    ) -> Result<SearchPayload, ServiceError>;
}
