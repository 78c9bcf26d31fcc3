use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::error::{AppError, Result};
use crate::shared::constants::{DATETIME_FORMAT, DATE_FORMAT};

const ACCEPTED_DATETIME_FORMATS: [&str; 3] = [DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a supervision window boundary
pub fn parse_datetime(field: &str, value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            AppError::InvalidDate(format!(
                "Invalid date value '{}' for {}, expected YYYY-MM-DD HH:MM",
                value, field
            ))
        })
}

/// Parse a date-only filter value
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::InvalidDate(format!(
            "Invalid date value '{}' for {}, expected YYYY-MM-DD",
            value, field
        ))
    })
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Last minute covered by a date-only upper bound (`YYYY-MM-DD 23:59`)
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        assert_eq!(parse_datetime("datetime_start", "2024-01-01 08:00").unwrap(), expected);
        assert_eq!(parse_datetime("datetime_start", "2024-01-01T08:00").unwrap(), expected);
        assert_eq!(parse_datetime("datetime_start", " 2024-01-01 08:00:00 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("datetime_end", "2024-13-01 08:00").unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
        assert!(err.to_string().contains("datetime_end"));

        assert!(parse_datetime("datetime_end", "yesterday").is_err());
    }

    #[test]
    fn test_format_and_end_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_datetime(&end_of_day(date)), "2024-02-29 23:59");
        assert!(parse_date("date_end", "2024-02-30").is_err());
    }
}
