use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Upstream source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Issue #{0} could not be resolved")]
    IssueNotFound(u64),

    #[error("Summary unavailable: {message}")]
    SummaryUnavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    /// 將 reqwest 錯誤歸類為上游不可用
    pub fn source_unavailable(context: &str, err: impl std::fmt::Display) -> Self {
        ReportError::SourceUnavailable {
            message: format!("{}: {}", context, err),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::SourceUnavailable { .. } | ReportError::SummaryUnavailable { .. } => {
                ErrorCategory::Upstream
            }
            ReportError::IssueNotFound(_) | ReportError::ValidationError { .. } => ErrorCategory::Data,
            ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 摘要失敗不影響報告本身
            ReportError::SummaryUnavailable { .. } => ErrorSeverity::Low,
            ReportError::SourceUnavailable { .. } => ErrorSeverity::Medium,
            ReportError::IssueNotFound(_)
            | ReportError::ValidationError { .. }
            | ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ReportError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::SourceUnavailable { .. } => {
                "Check the API endpoint, network connectivity and API key, then retry".to_string()
            }
            ReportError::IssueNotFound(id) => format!(
                "Make sure issue #{} exists and is visible to the configured API key",
                id
            ),
            ReportError::SummaryUnavailable { .. } => {
                "Check the [summary] endpoint and model, or run with --no-summary".to_string()
            }
            ReportError::IoError(_) => "Check file permissions and available disk space".to_string(),
            ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line arguments".to_string()
            }
            ReportError::ValidationError { .. } => {
                "Dates must be YYYY-MM-DD and --from must not be after --to".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::SourceUnavailable { message } => {
                format!("Could not fetch data from the project tracker: {}", message)
            }
            ReportError::IssueNotFound(id) => {
                format!("Issue #{} referenced by a time entry was not found", id)
            }
            ReportError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
