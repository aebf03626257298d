//! Shared utility functions for AQI crates.

/// Date utility functions
pub mod dates {
    use anyhow::Context;
    use chrono::{Days, Local, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
    }

    /// Today's date in local time
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Calendar date of forecast day `day` for a forecast issued on `issued`.
    /// Day 1 is the day after issue.
    pub fn forecast_date(issued: &NaiveDate, day: usize) -> anyhow::Result<NaiveDate> {
        issued
            .checked_add_days(Days::new(day as u64))
            .with_context(|| format!("forecast day {} from {} is out of range", day, issued))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2024-11-05");
            assert_eq!(parse_date(&formatted).unwrap(), date);
            assert_eq!(parse_date(" 2024-11-05 ").unwrap(), date);
        }

        #[test]
        fn test_parse_rejects_other_formats() {
            assert!(parse_date("20241105").is_err());
            assert!(parse_date("2024-02-30").is_err());
        }

        #[test]
        fn test_forecast_date_crosses_month_and_year() {
            let issued = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
            assert_eq!(
                forecast_date(&issued, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
            );
            assert_eq!(
                forecast_date(&issued, 3).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
            );
        }

        #[test]
        fn test_forecast_date_leap_day() {
            let issued = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
            assert_eq!(
                forecast_date(&issued, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            );
        }
    }
}
