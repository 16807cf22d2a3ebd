use crate::domain::model::{DateWindow, IssueMeta, RawTimeEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn page_size(&self) -> usize;
}

/// 時數紀錄來源
#[async_trait]
pub trait TimeEntrySource: Send + Sync {
    async fn fetch(&self, window: &DateWindow, user_id: &str) -> Result<Vec<RawTimeEntry>>;
}

/// 單一議題的中繼資料來源；去重與快取由 `IssueResolver` 負責
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_issue(&self, issue_id: u64) -> Result<IssueMeta>;
}

#[async_trait]
pub trait SummaryAnnotator: Send + Sync {
    async fn summarize(&self, report_text: &str) -> Result<String>;
}
