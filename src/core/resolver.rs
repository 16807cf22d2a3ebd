use crate::domain::model::IssueMeta;
use crate::domain::ports::IssueSource;
use crate::utils::error::{ReportError, Result};
use std::collections::HashMap;

/// 議題中繼資料解析器，每次產生報告建立一個，快取不跨請求共用
pub struct IssueResolver<'a, S: IssueSource + ?Sized> {
    source: &'a S,
    cache: HashMap<u64, IssueMeta>,
}

impl<'a, S: IssueSource + ?Sized> IssueResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// 解析所有 id；任何一筆失敗即整體失敗
    pub async fn resolve<I>(&mut self, ids: I) -> Result<HashMap<u64, IssueMeta>>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut resolved = HashMap::new();

        for id in ids {
            if resolved.contains_key(&id) {
                continue;
            }

            let meta = match self.cache.get(&id) {
                Some(meta) => {
                    tracing::trace!("Issue #{} served from cache", id);
                    meta.clone()
                }
                None => {
                    tracing::debug!("Fetching issue #{}", id);
                    let meta = self.source.fetch_issue(id).await?;
                    if meta.issue_id != id {
                        return Err(ReportError::IssueNotFound(id));
                    }
                    self.cache.insert(id, meta.clone());
                    meta
                }
            };

            resolved.insert(id, meta);
        }

        tracing::debug!("Resolved {} distinct issues", resolved.len());
        Ok(resolved)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockIssueSource {
        issues: HashMap<u64, IssueMeta>,
        calls: Arc<Mutex<Vec<u64>>>,
    }

    impl MockIssueSource {
        fn with_issue(mut self, id: u64, subject: &str, category: &str) -> Self {
            self.issues.insert(
                id,
                IssueMeta {
                    issue_id: id,
                    subject: subject.to_string(),
                    category: category.to_string(),
                },
            );
            self
        }

        /// 上游在 `requested` 底下回傳另一個議題
        fn with_misrouted(mut self, requested: u64, actual: u64) -> Self {
            self.issues.insert(
                requested,
                IssueMeta {
                    issue_id: actual,
                    subject: "Someone else's issue".to_string(),
                    category: "Bug".to_string(),
                },
            );
            self
        }

        async fn calls(&self) -> Vec<u64> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl IssueSource for MockIssueSource {
        async fn fetch_issue(&self, issue_id: u64) -> Result<IssueMeta> {
            self.calls.lock().await.push(issue_id);
            self.issues
                .get(&issue_id)
                .cloned()
                .ok_or(ReportError::IssueNotFound(issue_id))
        }
    }

    #[tokio::test]
    async fn test_each_issue_fetched_once() {
        let source = MockIssueSource::default()
            .with_issue(1, "Crash on save", "Bug")
            .with_issue(2, "Docs pass", "Feature");
        let mut resolver = IssueResolver::new(&source);

        let map = resolver.resolve(vec![1, 2, 1, 1, 2]).await.unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map[&1].subject, "Crash on save");
        assert_eq!(map[&2].category, "Feature");
        assert_eq!(source.calls().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_cache_reused_within_resolver() {
        let source = MockIssueSource::default().with_issue(5, "Refactor", "Task");
        let mut resolver = IssueResolver::new(&source);

        resolver.resolve(vec![5]).await.unwrap();
        resolver.resolve(vec![5]).await.unwrap();

        assert_eq!(resolver.cached_len(), 1);
        assert_eq!(source.calls().await, vec![5]);
    }

    #[tokio::test]
    async fn test_unknown_issue_fails_whole_call() {
        let source = MockIssueSource::default().with_issue(1, "Crash on save", "Bug");
        let mut resolver = IssueResolver::new(&source);

        let err = resolver.resolve(vec![1, 99]).await.unwrap_err();
        assert!(matches!(err, ReportError::IssueNotFound(99)));
    }

    #[tokio::test]
    async fn test_mismatched_issue_id_is_not_found() {
        let source = MockIssueSource::default()
            .with_issue(1, "Crash on save", "Bug")
            .with_misrouted(7, 8);
        let mut resolver = IssueResolver::new(&source);

        let err = resolver.resolve(vec![1, 7]).await.unwrap_err();

        assert!(matches!(err, ReportError::IssueNotFound(7)));
        // 錯誤的資料不得進入快取
        assert_eq!(resolver.cached_len(), 1);
        assert_eq!(source.calls().await, vec![1, 7]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let source = MockIssueSource::default();
        let mut resolver = IssueResolver::new(&source);

        assert!(resolver.resolve(Vec::new()).await.unwrap().is_empty());
        assert!(source.calls().await.is_empty());
    }
}
