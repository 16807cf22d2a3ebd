use crate::domain::model::{AggregatedIssue, IssueMeta, RawTimeEntry};
use crate::utils::error::{ReportError, Result};
use std::collections::{HashMap, HashSet};

/// 依議題合併時數紀錄
///
/// 輸出順序為議題首次出現的順序；評論保留原始出現順序，空白評論略過。
/// `issues` 必須涵蓋所有紀錄引用到的議題，否則回傳 `IssueNotFound`。
pub fn aggregate(
    entries: &[RawTimeEntry],
    issues: &HashMap<u64, IssueMeta>,
) -> Result<Vec<AggregatedIssue>> {
    let (aggregated, _) = entries.iter().try_fold(
        (Vec::<AggregatedIssue>::new(), HashMap::<u64, usize>::new()),
        |(mut aggregated, mut index), entry| {
            let slot = match index.get(&entry.issue_id) {
                Some(&slot) => slot,
                None => {
                    let meta = issues
                        .get(&entry.issue_id)
                        .ok_or(ReportError::IssueNotFound(entry.issue_id))?;
                    aggregated.push(AggregatedIssue::from_meta(meta));
                    index.insert(entry.issue_id, aggregated.len() - 1);
                    aggregated.len() - 1
                }
            };

            accumulate(&mut aggregated[slot], entry);
            Ok::<_, ReportError>((aggregated, index))
        },
    )?;

    Ok(aggregated)
}

fn accumulate(issue: &mut AggregatedIssue, entry: &RawTimeEntry) {
    issue.total_hours += entry.hours;

    if let Some(comment) = entry.comment.as_deref() {
        if !comment.trim().is_empty() {
            issue.comments.push(comment.to_string());
        }
    }
}

/// 議題引用的 id，依首次出現順序去重
pub fn distinct_issue_ids(entries: &[RawTimeEntry]) -> Vec<u64> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| e.issue_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
