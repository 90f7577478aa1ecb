use crate::errors::{IssueDeskError, Result};
use crate::models::issue::{Issue, IssueDraft};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SORT_BY: &str = "updatedAt";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}' (use asc or desc)", other)),
        }
    }
}

/// Browsing parameters for one list request. The server does all filtering, sorting and paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub sort_by: String,
    pub order: SortOrder,
    /// 1-indexed.
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: String::new(),
            priority: String::new(),
            assignee: String::new(),
            sort_by: DEFAULT_SORT_BY.to_string(),
            order: SortOrder::Desc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// All eight query parameters, always present. Unset filters go out as empty strings.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search", self.search.clone()),
            ("status", self.status.clone()),
            ("priority", self.priority.clone()),
            ("assignee", self.assignee.clone()),
            ("sortBy", self.sort_by.clone()),
            ("order", self.order.to_string()),
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }
}

/// The operations the views need from the issue server.
#[async_trait]
pub trait IssueApi: Send + Sync {
    async fn list_issues(&self, query: &ListQuery) -> Result<Vec<Issue>>;
    async fn get_issue(&self, id: &str) -> Result<Issue>;
    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue>;
    async fn update_issue(&self, id: &str, draft: &IssueDraft) -> Result<Issue>;
}

pub struct IssueClient {
    client: Client,
    base_url: String,
}

impl IssueClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IssueDeskError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks the server answers on `/health`.
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        tracing::debug!(method = "GET", %url, "sending request");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(IssueDeskError::ApiError(status.as_u16(), text));
        }

        Ok(())
    }

    fn issue_url(&self, id: &str) -> String {
        format!("{}/issues/{}", self.base_url, urlencoding::encode(id))
    }
}

#[async_trait]
impl IssueApi for IssueClient {
    async fn list_issues(&self, query: &ListQuery) -> Result<Vec<Issue>> {
        let url = format!("{}/issues", self.base_url);
        let params = query.to_params();
        tracing::debug!(method = "GET", %url, ?params, "sending request");

        let response = self.client.get(&url).query(&params).send().await?;

        decode(response, None).await
    }

    async fn get_issue(&self, id: &str) -> Result<Issue> {
        let url = self.issue_url(id);
        tracing::debug!(method = "GET", %url, "sending request");

        let response = self.client.get(&url).send().await?;

        decode(response, Some(id)).await
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue> {
        let url = format!("{}/issues", self.base_url);
        tracing::debug!(method = "POST", %url, "sending request");

        let response = self.client.post(&url).json(draft).send().await?;

        decode(response, None).await
    }

    async fn update_issue(&self, id: &str, draft: &IssueDraft) -> Result<Issue> {
        let url = self.issue_url(id);
        tracing::debug!(method = "PUT", %url, "sending request");

        let response = self.client.put(&url).json(draft).send().await?;

        decode(response, Some(id)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, issue_id: Option<&str>) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, issue_id) {
            return Err(IssueDeskError::IssueNotFound(id.to_string()));
        }
        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %text, "request failed");
        return Err(IssueDeskError::ApiError(status.as_u16(), text));
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| IssueDeskError::InvalidResponse(format!("Failed to parse response: {}", e)))
}
