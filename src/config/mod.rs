#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_required_field, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::ReportSettings;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "worklog-report")]
#[command(about = "Summarize Redmine time entries into a weekly work report")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Redmine base URL (overrides [redmine] endpoint)
    #[arg(long, env = "REDMINE_URL")]
    pub endpoint: Option<String>,

    /// Redmine API key (overrides [redmine] api_key)
    #[arg(long, env = "REDMINE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// User whose time entries are reported ("me" for the key owner)
    #[arg(long)]
    pub user_id: Option<String>,

    /// First day of the window, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the window, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Skip the language-model summary
    #[arg(long)]
    pub no_summary: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入配置檔（如有）並套用命令列覆蓋
    pub fn to_settings(&self) -> Result<ReportSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                ReportSettings::from_toml(&file)
            }
            None => ReportSettings {
                endpoint: validate_required_field("endpoint", &self.endpoint)?.clone(),
                ..ReportSettings::default()
            },
        };

        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(api_key) = &self.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(user_id) = &self.user_id {
            settings.user_id = user_id.clone();
        }
        if let Some(output) = &self.output {
            settings.output_path = Some(output.clone());
        }
        if self.no_summary {
            settings.summary = None;
        }
        settings.set_window(self.from.as_deref(), self.to.as_deref())?;

        settings.validate()?;
        Ok(settings)
    }
}
