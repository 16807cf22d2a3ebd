// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod llm;
pub mod redmine;

pub use llm::ChatSummarizer;
pub use redmine::RedmineClient;
