//! Display formatting for records coming off the sheet API.
//!
//! The remote end serializes dates inconsistently (plain `YYYY-MM-DD`,
//! full RFC 3339 timestamps, or `YYYY/MM/DD`), so everything funnels
//! through one tolerant parser. Labels and urgency tiers are kept as pure
//! functions so the views stay headless-testable.

use chrono::NaiveDate;
use tui::style::Color;

/// Parse a date-like string from the API.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Some(date);
    }
    // Timestamps like 2024-01-05T00:00:00.000Z
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    None
}

/// Format a date-like value for display as `YYYY/MM/DD`, or `-` when the
/// value is missing or unparseable.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y/%m/%d").to_string(),
        None => "-".to_string(),
    }
}

/// Format a date-like value as `YYYY-MM-DD` for an edit control, or an
/// empty string when the value is missing or unparseable.
pub fn format_date_for_input(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Parse a date-like value into a `NaiveDate` for the date editor,
/// falling back to today when the value is missing or unparseable.
pub fn parse_date_or_today(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Strip control characters from free text before it reaches the render
/// surface. Tabs become spaces so column alignment survives.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c == '\t' {
                Some(' ')
            } else if c.is_control() {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

/// Days-remaining label used on the dashboard lists.
pub fn dashboard_days_label(days: i64) -> String {
    if days < 0 {
        format!("{} days overdue", days.abs())
    } else if days == 0 {
        "today".to_string()
    } else {
        format!("in {} days", days)
    }
}

/// Days-remaining label used in the project table.
pub fn list_days_label(days: i64) -> String {
    if days < 0 {
        format!("{} days overdue", days.abs())
    } else if days == 0 {
        "today".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Visual urgency tier for a days-remaining value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Urgent,
    Normal,
}

impl Urgency {
    pub fn color(self) -> Color {
        match self {
            Urgency::Overdue => Color::Red,
            Urgency::Urgent => Color::Yellow,
            Urgency::Normal => Color::Green,
        }
    }
}

/// Dashboard tiering. Both dashboard lists hold inherently time-sensitive
/// projects, so there is no Normal tier here.
pub fn dashboard_urgency(days: i64) -> Urgency {
    if days < 0 {
        Urgency::Overdue
    } else {
        Urgency::Urgent
    }
}

/// Project-table tiering: overdue below zero, urgent up to three days out,
/// normal beyond that. Deliberately not the same as the dashboard tiering.
pub fn list_urgency(days: i64) -> Urgency {
    if days < 0 {
        Urgency::Overdue
    } else if days <= 3 {
        Urgency::Urgent
    } else {
        Urgency::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_dates() {
        assert_eq!(format_date("2024-03-05"), "2024/03/05");
        assert_eq!(format_date_for_input("2024/03/05"), "2024-03-05");
    }

    #[test]
    fn formats_timestamps() {
        assert_eq!(format_date("2024-01-05T00:00:00.000Z"), "2024/01/05");
        assert_eq!(format_date_for_input("2024-01-05T15:30:00+09:00"), "2024-01-05");
    }

    #[test]
    fn invalid_dates_fall_back() {
        assert_eq!(format_date(""), "-");
        assert_eq!(format_date("not a date"), "-");
        assert_eq!(format_date_for_input(""), "");
        assert_eq!(format_date_for_input("2024-13-40"), "");
    }

    #[test]
    fn input_then_display_preserves_the_calendar_date() {
        for raw in ["2023-12-31", "2024/02/29", "2024-01-05T00:00:00.000Z"] {
            let for_input = format_date_for_input(raw);
            assert_eq!(format_date(&for_input), format_date(raw));
        }
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize("a\u{1b}[31mb\r\nc"), "a[31mbc");
        assert_eq!(sanitize("col\tumn"), "col umn");
        assert_eq!(sanitize("納期アラート"), "納期アラート");
    }

    #[test]
    fn dashboard_labels_cover_all_signs() {
        assert_eq!(dashboard_days_label(-2), "2 days overdue");
        assert_eq!(dashboard_days_label(0), "today");
        assert_eq!(dashboard_days_label(5), "in 5 days");
    }

    #[test]
    fn list_labels_cover_all_signs() {
        assert_eq!(list_days_label(-1), "1 days overdue");
        assert_eq!(list_days_label(0), "today");
        assert_eq!(list_days_label(3), "3 days");
    }

    #[test]
    fn dashboard_urgency_is_two_tier() {
        assert_eq!(dashboard_urgency(-1), Urgency::Overdue);
        assert_eq!(dashboard_urgency(0), Urgency::Urgent);
        assert_eq!(dashboard_urgency(10), Urgency::Urgent);
    }

    #[test]
    fn list_urgency_is_three_tier() {
        assert_eq!(list_urgency(-1), Urgency::Overdue);
        assert_eq!(list_urgency(0), Urgency::Urgent);
        assert_eq!(list_urgency(3), Urgency::Urgent);
        assert_eq!(list_urgency(4), Urgency::Normal);
    }
}
