use crate::domain::model::{DateWindow, IssueMeta, RawTimeEntry};
use crate::domain::ports::{ConfigProvider, IssueSource, TimeEntrySource};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

#[derive(Debug, Deserialize)]
struct TimeEntriesPage {
    time_entries: Vec<TimeEntryDto>,
    #[serde(default)]
    total_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TimeEntryDto {
    #[serde(default)]
    issue: Option<IdRef>,
    hours: f64,
    #[serde(default)]
    comments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct IssueEnvelope {
    issue: IssueDto,
}

#[derive(Debug, Deserialize)]
struct IssueDto {
    id: u64,
    subject: String,
    tracker: NamedRef,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

/// Redmine REST API 用戶端，同時提供時數紀錄與議題查詢
#[derive(Debug, Clone)]
pub struct RedmineClient {
    client: Client,
    endpoint: String,
    api_key: String,
    page_size: usize,
}

impl RedmineClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size: 100,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| ReportError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
            page_size: config.page_size().max(1),
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.header(API_KEY_HEADER, &self.api_key)
        }
    }

    async fn fetch_page(
        &self,
        window: &DateWindow,
        user_id: &str,
        offset: usize,
    ) -> Result<TimeEntriesPage> {
        let url = format!("{}/time_entries.json", self.endpoint);
        tracing::debug!("Requesting {} (offset {})", url, offset);

        let request = self.client.get(&url).query(&[
            ("user_id", user_id.to_string()),
            ("from", window.start_str()),
            ("to", window.end_str()),
            ("limit", self.page_size.to_string()),
            ("offset", offset.to_string()),
        ]);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ReportError::source_unavailable("time entry request failed", e))?;

        let status = response.status();
        tracing::debug!("Time entry response status: {}", status);
        if !status.is_success() {
            return Err(ReportError::SourceUnavailable {
                message: format!("time entry API returned {}", status),
            });
        }

        response
            .json::<TimeEntriesPage>()
            .await
            .map_err(|e| ReportError::source_unavailable("malformed time entry response", e))
    }
}

/// 沒有 `total_count` 時，讀到空頁或不滿一頁才停止
fn has_more_pages(
    total_count: Option<usize>,
    offset: usize,
    page_len: usize,
    page_size: usize,
) -> bool {
    if page_len == 0 {
        return false;
    }
    match total_count {
        Some(total) => offset < total,
        None => page_len >= page_size,
    }
}

#[async_trait]
impl TimeEntrySource for RedmineClient {
    async fn fetch(&self, window: &DateWindow, user_id: &str) -> Result<Vec<RawTimeEntry>> {
        let mut entries = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(window, user_id, offset).await?;
            let page_len = page.time_entries.len();

            for dto in page.time_entries {
                match dto.issue {
                    Some(issue) => entries.push(RawTimeEntry {
                        issue_id: issue.id,
                        hours: dto.hours,
                        comment: dto.comments,
                    }),
                    None => tracing::warn!(
                        "Skipping {}h logged without an issue reference",
                        dto.hours
                    ),
                }
            }

            offset += page_len;
            if !has_more_pages(page.total_count, offset, page_len, self.page_size) {
                break;
            }
        }

        Ok(entries)
    }
}

#[async_trait]
impl IssueSource for RedmineClient {
    async fn fetch_issue(&self, issue_id: u64) -> Result<IssueMeta> {
        let url = format!("{}/issues/{}.json", self.endpoint, issue_id);

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ReportError::source_unavailable("issue request failed", e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ReportError::IssueNotFound(issue_id));
        }
        if !status.is_success() {
            return Err(ReportError::SourceUnavailable {
                message: format!("issue API returned {} for #{}", status, issue_id),
            });
        }

        let envelope = response
            .json::<IssueEnvelope>()
            .await
            .map_err(|e| ReportError::source_unavailable("malformed issue response", e))?;

        Ok(IssueMeta {
            issue_id: envelope.issue.id,
            subject: envelope.issue.subject,
            category: envelope.issue.tracker.name,
        })
    }
}
