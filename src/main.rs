use clap::Parser;
use std::sync::Arc;
use worklog_report::core::Storage;
use worklog_report::utils::error::{ErrorSeverity, ReportError};
use worklog_report::utils::logger;
use worklog_report::{
    ChatSummarizer, CliConfig, LocalStorage, RedmineClient, ReportEngine, ReportRequest,
    ReportSettings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting worklog-report");

    let settings = match config.to_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved settings: endpoint={}, user={}", settings.endpoint, settings.user_id);

    match run(&settings).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(
                "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run(settings: &ReportSettings) -> Result<(), ReportError> {
    let redmine = RedmineClient::from_config(settings)?;
    let mut engine = ReportEngine::new(redmine.clone(), redmine);

    if let Some(summary) = &settings.summary {
        let summarizer = ChatSummarizer::new(
            summary.endpoint.clone(),
            summary.model.clone(),
            summary.api_key.clone(),
            summary.timeout_seconds,
        )?;
        engine = engine.with_summarizer(Arc::new(summarizer));
    }

    let request = ReportRequest {
        user_id: settings.user_id.clone(),
        window: settings.window,
    };
    let today = chrono::Local::now().date_naive();
    let report = engine.run(&request, today).await?;
    let text = report.to_text();

    match &settings.output_path {
        Some(path) => {
            LocalStorage::new(".".to_string())
                .write_file(path, text.as_bytes())
                .await?;
            tracing::info!("📁 Report for {} saved to: {}", report.window, path);
        }
        None => println!("{}", text),
    }

    Ok(())
}
