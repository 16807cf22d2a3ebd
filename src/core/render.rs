use crate::core::numeral::to_chinese;
use crate::domain::model::{AggregatedIssue, CategoryGroup};
use html_escape::encode_text;
use std::fmt::Write;

const LIST_OPEN: &str = "<ol style=\"list-style: none\">";

/// 依分類分組，分類保持首次出現順序，組內依議題 id 升冪
pub fn group_by_category(issues: &[AggregatedIssue]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for issue in issues {
        match groups.iter_mut().find(|g| g.category == issue.category) {
            Some(group) => group.issues.push(issue.clone()),
            None => groups.push(CategoryGroup {
                category: issue.category.clone(),
                issues: vec![issue.clone()],
            }),
        }
    }

    for group in &mut groups {
        group.issues.sort_by_key(|i| i.issue_id);
    }

    groups
}

pub fn render(issues: &[AggregatedIssue]) -> String {
    render_groups(&group_by_category(issues))
}

pub fn render_groups(groups: &[CategoryGroup]) -> String {
    let mut out = String::new();

    for group in groups {
        // 寫入 String 不會失敗
        let _ = writeln!(out, "<h3>{}</h3>", encode_text(&group.category));
        out.push_str(LIST_OPEN);
        out.push('\n');

        for (idx, issue) in group.issues.iter().enumerate() {
            let _ = write!(
                out,
                "<li>{}、{} (#{}) {}h",
                to_chinese(idx as u64 + 1),
                encode_text(&issue.subject),
                issue.issue_id,
                format_hours(issue.total_hours)
            );

            if issue.comments.is_empty() {
                out.push_str("</li>\n");
                continue;
            }

            out.push('\n');
            out.push_str(LIST_OPEN);
            out.push('\n');
            for (n, comment) in issue.comments.iter().enumerate() {
                let _ = writeln!(out, "<li>{}. {}</li>", n + 1, encode_text(comment));
            }
            out.push_str("</ol>\n</li>\n");
        }

        out.push_str("</ol>\n");
    }

    out
}

/// 最多兩位小數，去掉多餘的 0
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 100.0).round() / 100.0;
    format!("{}", rounded)
}
