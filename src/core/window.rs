use crate::domain::model::DateWindow;
use chrono::{Datelike, Duration, NaiveDate};

/// 有明確時段就原樣使用，否則取 `today` 所在的週日至週六
pub fn resolve(explicit: Option<DateWindow>, today: NaiveDate) -> DateWindow {
    explicit.unwrap_or_else(|| current_week(today))
}

pub fn current_week(today: NaiveDate) -> DateWindow {
    let offset = i64::from(today.weekday().num_days_from_sunday());
    DateWindow::spanning(today - Duration::days(offset), 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_midweek_resolves_to_sunday_through_saturday() {
        // 2024-03-06 是週三
        let window = current_week(date("2024-03-06"));
        assert_eq!(window.start_str(), "2024-03-03");
        assert_eq!(window.end_str(), "2024-03-09");
    }

    #[test]
    fn test_week_boundaries() {
        let sunday = current_week(date("2024-03-03"));
        assert_eq!(sunday.start_str(), "2024-03-03");

        let saturday = current_week(date("2024-03-09"));
        assert_eq!(saturday.start_str(), "2024-03-03");
        assert_eq!(saturday.end_str(), "2024-03-09");
    }

    #[test]
    fn test_week_spanning_year_end() {
        let window = current_week(date("2025-01-01"));
        assert_eq!(window.start_str(), "2024-12-29");
        assert_eq!(window.end_str(), "2025-01-04");
    }

    #[test]
    fn test_explicit_window_passes_through() {
        let explicit = DateWindow::parse("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(resolve(Some(explicit), date("2024-03-06")), explicit);
        assert_eq!(resolve(None, date("2024-03-06")).start_str(), "2024-03-03");
    }
}
