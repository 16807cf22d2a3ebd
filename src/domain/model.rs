use crate::utils::error::{ReportError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 報告時段，包含首尾兩日
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(ReportError::ValidationError {
                message: format!("window start {} is after end {}", from, to),
            });
        }
        Ok(Self { from, to })
    }

    /// 從 `start` 起連續 `days` 天
    pub fn spanning(start: NaiveDate, days: u32) -> Self {
        let extra = i64::from(days.max(1) - 1);
        Self {
            from: start,
            to: start + Duration::days(extra),
        }
    }

    /// 從 `YYYY-MM-DD` 字串建立
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::new(parse_date("from", from)?, parse_date("to", to)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn start_str(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start_str(), self.end_str())
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        ReportError::ValidationError {
            message: format!("invalid {} date '{}': {}", field, value, e),
        }
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTimeEntry {
    pub issue_id: u64,
    pub hours: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMeta {
    pub issue_id: u64,
    pub subject: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedIssue {
    pub issue_id: u64,
    pub subject: String,
    pub category: String,
    pub total_hours: f64,
    pub comments: Vec<String>,
}

impl AggregatedIssue {
    pub fn from_meta(meta: &IssueMeta) -> Self {
        Self {
            issue_id: meta.issue_id,
            subject: meta.subject.clone(),
            category: meta.category.clone(),
            total_hours: 0.0,
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub issues: Vec<AggregatedIssue>,
}

/// 單次產生報告的結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkReport {
    pub window: DateWindow,
    pub groups: Vec<CategoryGroup>,
    pub body: String,
    pub summary: Option<String>,
}

impl WorkReport {
    pub const EMPTY_MESSAGE: &'static str = "本时段没有工作记录。";

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_hours(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| g.issues.iter())
            .map(|i| i.total_hours)
            .sum()
    }

    /// 給呼叫端的最終文字：空報告換成固定訊息，摘要附在最後
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return Self::EMPTY_MESSAGE.to_string();
        }

        match self.summary.as_deref().map(str::trim) {
            Some(summary) if !summary.is_empty() => format!(
                "{}<p>{}</p>\n",
                self.body,
                html_escape::encode_text(summary)
            ),
            _ => self.body.clone(),
        }
    }
}
