use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use sprig_core::ids::{CallerId, ChildId, EntryId};
use sprig_core::service::{
    Category, ChildRef, DataService, Page, SearchPayload, ServiceError, TimeWindow,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the remote tracking service.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: SecretString,
}

/// reqwest-backed implementation of the data-service contract. Retries,
/// pagination mechanics and request timeouts beyond connect are the
/// transport layer's concern, not ours.
pub struct HttpDataService {
    client: Client,
    config: ClientConfig,
}

impl HttpDataService {
    pub fn new(config: ClientConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, ServiceError> {
        self.client
            .get(url)
            .query(query)
            .bearer_auth(self.config.api_token.expose_secret())
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))
    }

    /// Decode a 2xx body, map 404 to None, classify everything else.
    async fn read_optional(
        response: Response,
    ) -> Result<Option<serde_json::Value>, ServiceError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status.as_u16(), body));
        }
        response
            .json::<serde_json::Value>()
            .await
            .map(Some)
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn read_required(response: Response) -> Result<serde_json::Value, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status.as_u16(), body));
        }
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DataService for HttpDataService {
    #[instrument(skip(self), fields(caller = %caller))]
    async fn fetch_children(&self, caller: &CallerId) -> Result<Vec<ChildRef>, ServiceError> {
        let url = self.url(&format!("/v1/callers/{caller}/children"));
        let response = self.get(&url, &[]).await?;
        let body = Self::read_required(response).await?;
        serde_json::from_value(body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    #[instrument(skip(self), fields(child = %child, window = %window, category = %category))]
    async fn fetch_category(
        &self,
        child: &ChildId,
        window: TimeWindow,
        category: Category,
    ) -> Result<Option<serde_json::Value>, ServiceError> {
        let url = self.url(&format!("/v1/children/{child}/insights/{category}"));
        let response = self.get(&url, &[("window", window.to_string())]).await?;
        Self::read_optional(response).await
    }

    #[instrument(skip(self), fields(child = %child, entry = %entry))]
    async fn fetch_entry(
        &self,
        child: &ChildId,
        entry: &EntryId,
    ) -> Result<Option<serde_json::Value>, ServiceError> {
        let url = self.url(&format!("/v1/children/{child}/journal/{entry}"));
        let response = self.get(&url, &[]).await?;
        Self::read_optional(response).await
    }

    #[instrument(skip(self), fields(child = %child, limit = page.limit, offset = page.offset))]
    async fn search(
        &self,
        child: &ChildId,
        query: &str,
        page: Page,
    ) -> Result<SearchPayload, ServiceError> {
        let url = self.url(&format!("/v1/children/{child}/journal/search"));
        let response = self
            .get(
                &url,
                &[
                    ("q", query.to_string()),
                    ("limit", page.limit.to_string()),
                    ("offset", page.offset.to_string()),
                ],
            )
            .await?;
        let body = Self::read_required(response).await?;
        serde_json::from_value(body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}
