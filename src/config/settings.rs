use crate::config::toml_config::TomlConfig;
use crate::domain::model::DateWindow;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};

pub const DEFAULT_USER_ID: &str = "me";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
}

/// 合併配置檔與命令列後的最終設定
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub endpoint: String,
    pub api_key: String,
    pub user_id: String,
    pub timeout_seconds: u64,
    pub page_size: usize,
    pub window: Option<DateWindow>,
    pub summary: Option<SummarySettings>,
    pub output_path: Option<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            user_id: DEFAULT_USER_ID.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            page_size: DEFAULT_PAGE_SIZE,
            window: None,
            summary: None,
            output_path: None,
        }
    }
}

impl ReportSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let redmine = &config.redmine;
        let summary = config
            .summary
            .as_ref()
            .filter(|_| config.summary_enabled())
            .map(|s| SummarySettings {
                endpoint: s.endpoint.clone(),
                api_key: s.api_key.clone(),
                model: s
                    .model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
                timeout_seconds: s.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            });

        Self {
            endpoint: redmine.endpoint.clone(),
            api_key: redmine.api_key.clone().unwrap_or_default(),
            user_id: redmine
                .user_id
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            timeout_seconds: redmine.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            page_size: redmine.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            window: None,
            summary,
            output_path: config.output_path().map(str::to_string),
        }
    }

    /// `from`、`to` 需同時提供或同時省略
    pub fn set_window(&mut self, from: Option<&str>, to: Option<&str>) -> Result<()> {
        self.window = match (from, to) {
            (Some(from), Some(to)) => Some(DateWindow::parse(from, to)?),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ReportError::MissingConfigError {
                    field: "to".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(ReportError::MissingConfigError {
                    field: "from".to_string(),
                })
            }
        };
        Ok(())
    }
}

impl ConfigProvider for ReportSettings {
    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(ReportError::MissingConfigError {
                field: "redmine.endpoint".to_string(),
            });
        }
        validation::validate_url("redmine.endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("redmine.user_id", &self.user_id)?;
        validation::validate_range("redmine.timeout_seconds", self.timeout_seconds, 1, 600)?;
        validation::validate_page_size("redmine.page_size", self.page_size)?;

        if let Some(summary) = &self.summary {
            validation::validate_url("summary.endpoint", &summary.endpoint)?;
            validation::validate_non_empty_string("summary.model", &summary.model)?;
        }

        if let Some(path) = &self.output_path {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}
