use crate::domain::ports::SummaryAnnotator;
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "你是一名项目助理，负责把工时报告整理成简短的周报摘要。";
const INSTRUCTION: &str = "请用不超过100个字总结上周的工作，不要直接照抄原文：";

/// OpenAI 相容的 chat completions 摘要服務
#[derive(Debug, Clone)]
pub struct ChatSummarizer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl ChatSummarizer {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ReportError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        })
    }

    fn request_body(&self, report_text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("{}\n\n{}", INSTRUCTION, report_text) }
            ]
        })
    }
}

#[async_trait]
impl SummaryAnnotator for ChatSummarizer {
    async fn summarize(&self, report_text: &str) -> Result<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(report_text));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.trim()));
        }

        tracing::debug!("Requesting summary from {}", self.endpoint);
        let response = request.send().await.map_err(|e| ReportError::SummaryUnavailable {
            message: format!("request failed: {}", e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::SummaryUnavailable {
                message: format!("summary API returned {}", status),
            });
        }

        let chat: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ReportError::SummaryUnavailable {
                    message: format!("malformed response: {}", e),
                })?;

        // 沒有內容時回傳空字串
        let content = chat
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|a| a.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or_default();

        Ok(content.to_string())
    }
}
