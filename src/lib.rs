pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use adapters::{ChatSummarizer, RedmineClient};
pub use config::settings::ReportSettings;
pub use core::engine::{ReportEngine, ReportRequest};
pub use domain::model::{DateWindow, WorkReport};
pub use utils::error::{ReportError, Result};
