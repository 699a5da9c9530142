//! Small shared helpers

use chrono::{DateTime, Local, NaiveDate};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render an ISO date (`2025-03-01`) as `01/03/2025` for display
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Render a backend timestamp as `dd/mm/yy hh:mm AM/PM` in local time
///
/// Falls back to the raw string when it does not parse as RFC 3339.
pub fn format_date_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%d/%m/%y %I:%M %p")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(format_date(date), "01/03/2025");
    }

    #[test]
    fn test_format_date_time_twelve_hour_clock() {
        // Build the expected string through chrono so the assertion holds
        // in any local timezone.
        let raw = "2025-03-01T14:05:00+00:00";
        let expected = chrono::Utc
            .with_ymd_and_hms(2025, 3, 1, 14, 5, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%d/%m/%y %I:%M %p")
            .to_string();
        assert_eq!(format_date_time(raw), expected);
        assert!(expected.ends_with("AM") || expected.ends_with("PM"));
    }

    #[test]
    fn test_format_date_time_passes_through_garbage() {
        assert_eq!(format_date_time("not-a-date"), "not-a-date");
    }
}
