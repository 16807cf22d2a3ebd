pub mod aggregator;
pub mod engine;
pub mod numeral;
pub mod render;
pub mod resolver;
pub mod window;

pub use crate::domain::model::{
    AggregatedIssue, CategoryGroup, DateWindow, IssueMeta, RawTimeEntry, WorkReport,
};
pub use crate::domain::ports::{
    ConfigProvider, IssueSource, Storage, SummaryAnnotator, TimeEntrySource,
};
pub use crate::utils::error::Result;
