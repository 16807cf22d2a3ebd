use crate::core::{aggregator, render, resolver::IssueResolver, window};
use crate::domain::model::{DateWindow, WorkReport};
use crate::domain::ports::{IssueSource, SummaryAnnotator, TimeEntrySource};
use crate::utils::error::{ReportError, Result};
use chrono::NaiveDate;
use std::sync::Arc;

/// 單次報告請求
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub user_id: String,
    pub window: Option<DateWindow>,
}

pub struct ReportEngine<T: TimeEntrySource, I: IssueSource> {
    entries: T,
    issues: I,
    summarizer: Option<Arc<dyn SummaryAnnotator>>,
}

impl<T: TimeEntrySource, I: IssueSource> ReportEngine<T, I> {
    pub fn new(entries: T, issues: I) -> Self {
        Self {
            entries,
            issues,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn SummaryAnnotator>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub async fn run(&self, request: &ReportRequest, today: NaiveDate) -> Result<WorkReport> {
        let window = window::resolve(request.window, today);
        tracing::info!("Building work report for user {} ({})", request.user_id, window);

        let raw_entries = self.entries.fetch(&window, &request.user_id).await?;
        tracing::info!("Fetched {} time entries", raw_entries.len());

        let mut resolver = IssueResolver::new(&self.issues);
        let issue_map = resolver
            .resolve(aggregator::distinct_issue_ids(&raw_entries))
            .await?;

        let aggregated = aggregator::aggregate(&raw_entries, &issue_map)?;
        let groups = render::group_by_category(&aggregated);
        let body = render::render_groups(&groups);
        tracing::info!(
            "Aggregated {} issues in {} categories",
            aggregated.len(),
            groups.len()
        );

        let summary = if groups.is_empty() {
            None
        } else {
            self.summarize(&body).await
        };

        Ok(WorkReport {
            window,
            groups,
            body,
            summary,
        })
    }

    // 摘要失敗只降級，不影響報告
    async fn summarize(&self, body: &str) -> Option<String> {
        let summarizer = self.summarizer.as_ref()?;

        match summarizer.summarize(body).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => {
                tracing::warn!("Summary service returned no content");
                None
            }
            Err(e) => {
                let err = ReportError::SummaryUnavailable {
                    message: e.to_string(),
                };
                tracing::warn!("⚠️ {} ({})", err, err.recovery_suggestion());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{IssueMeta, RawTimeEntry};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockEntries {
        entries: Vec<RawTimeEntry>,
        fail: bool,
    }

    #[async_trait]
    impl TimeEntrySource for MockEntries {
        async fn fetch(&self, _window: &DateWindow, _user_id: &str) -> Result<Vec<RawTimeEntry>> {
            if self.fail {
                return Err(ReportError::SourceUnavailable {
                    message: "connection refused".to_string(),
                });
            }
            Ok(self.entries.clone())
        }
    }

    #[derive(Default)]
    struct MockIssues {
        issues: HashMap<u64, IssueMeta>,
    }

    #[async_trait]
    impl IssueSource for MockIssues {
        async fn fetch_issue(&self, issue_id: u64) -> Result<IssueMeta> {
            self.issues
                .get(&issue_id)
                .cloned()
                .ok_or(ReportError::IssueNotFound(issue_id))
        }
    }

    struct MockSummary {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SummaryAnnotator for MockSummary {
        async fn summarize(&self, _report_text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or(ReportError::SummaryUnavailable {
                message: "timeout".to_string(),
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    fn request() -> ReportRequest {
        ReportRequest {
            user_id: "7".to_string(),
            window: None,
        }
    }

    fn scenario_engine(entries: Vec<RawTimeEntry>) -> ReportEngine<MockEntries, MockIssues> {
        let issues = MockIssues {
            issues: HashMap::from([
                (
                    1,
                    IssueMeta {
                        issue_id: 1,
                        subject: "Crash on save".to_string(),
                        category: "Bug".to_string(),
                    },
                ),
                (
                    2,
                    IssueMeta {
                        issue_id: 2,
                        subject: "Docs pass".to_string(),
                        category: "Feature".to_string(),
                    },
                ),
            ]),
        };
        ReportEngine::new(MockEntries { entries, fail: false }, issues)
    }

    fn scenario_entries() -> Vec<RawTimeEntry> {
        vec![
            RawTimeEntry {
                issue_id: 1,
                hours: 2.0,
                comment: Some("fixed bug".to_string()),
            },
            RawTimeEntry {
                issue_id: 1,
                hours: 1.0,
                comment: Some(String::new()),
            },
            RawTimeEntry {
                issue_id: 2,
                hours: 3.0,
                comment: Some("wrote docs".to_string()),
            },
        ]
    }

    #[tokio::test]
    async fn test_scenario_report() {
        let engine = scenario_engine(scenario_entries());

        let report = engine.run(&request(), today()).await.unwrap();

        assert_eq!(report.window.start_str(), "2024-03-03");
        assert_eq!(report.window.end_str(), "2024-03-09");
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].category, "Bug");
        assert_eq!(report.groups[0].issues[0].total_hours, 3.0);
        assert_eq!(report.groups[0].issues[0].comments, vec!["fixed bug"]);
        assert_eq!(report.groups[1].category, "Feature");
        assert_eq!(report.total_hours(), 6.0);
        assert!(report.body.contains("一、Crash on save (#1) 3h"));
        assert_eq!(report.summary, None);
    }

    #[tokio::test]
    async fn test_empty_entries_yield_fixed_message() {
        let summary = Arc::new(MockSummary {
            reply: Some("不该被调用".to_string()),
            calls: AtomicUsize::new(0),
        });
        let engine = scenario_engine(vec![]).with_summarizer(summary.clone());

        let report = engine.run(&request(), today()).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(report.body, "");
        assert_eq!(report.to_text(), WorkReport::EMPTY_MESSAGE);
        assert_eq!(summary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unresolved_issue_aborts() {
        let mut entries = scenario_entries();
        entries.push(RawTimeEntry {
            issue_id: 404,
            hours: 1.0,
            comment: None,
        });
        let engine = scenario_engine(entries);

        let err = engine.run(&request(), today()).await.unwrap_err();
        assert!(matches!(err, ReportError::IssueNotFound(404)));
    }

    #[tokio::test]
    async fn test_source_failure_aborts() {
        let engine = ReportEngine::new(
            MockEntries {
                entries: vec![],
                fail: true,
            },
            MockIssues::default(),
        );

        let err = engine.run(&request(), today()).await.unwrap_err();
        assert!(matches!(err, ReportError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_summary_appended_when_available() {
        let summary = Arc::new(MockSummary {
            reply: Some(" 修复保存崩溃并完善文档。 ".to_string()),
            calls: AtomicUsize::new(0),
        });
        let engine = scenario_engine(scenario_entries()).with_summarizer(summary.clone());

        let report = engine.run(&request(), today()).await.unwrap();

        assert_eq!(report.summary.as_deref(), Some("修复保存崩溃并完善文档。"));
        assert!(report.to_text().ends_with("<p>修复保存崩溃并完善文档。</p>\n"));
        assert_eq!(summary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summary_failure_degrades() {
        let summary = Arc::new(MockSummary {
            reply: None,
            calls: AtomicUsize::new(0),
        });
        let engine = scenario_engine(scenario_entries()).with_summarizer(summary);

        let report = engine.run(&request(), today()).await.unwrap();

        assert_eq!(report.summary, None);
        assert_eq!(report.to_text(), report.body);
    }

    #[tokio::test]
    async fn test_explicit_window_is_used() {
        let engine = scenario_engine(scenario_entries());
        let request = ReportRequest {
            user_id: "7".to_string(),
            window: Some(DateWindow::parse("2024-01-01", "2024-01-31").unwrap()),
        };

        let report = engine.run(&request, today()).await.unwrap();
        assert_eq!(report.window.start_str(), "2024-01-01");
        assert_eq!(report.window.end_str(), "2024-01-31");
    }
}
