use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Date-only filter values
    /// - Valid: "2024-01-31"
    /// - Invalid: "2024-1-31", "31.01.2024", "2024-01-31 08:00"
    pub static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    /// Date-time values of a supervision window, minutes precision with optional seconds
    /// - Valid: "2024-01-31 08:00", "2024-01-31T08:00", "2024-01-31 08:00:00"
    /// - Invalid: "2024-01-31", "2024-01-31 8:00"
    pub static ref DATETIME_REGEX: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}(:\d{2})?$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_regex() {
        assert!(DATE_REGEX.is_match("2024-01-31"));
        assert!(!DATE_REGEX.is_match("2024-1-31"));
        assert!(!DATE_REGEX.is_match("31.01.2024"));
        assert!(!DATE_REGEX.is_match("2024-01-31 08:00"));
        assert!(!DATE_REGEX.is_match(""));
    }

    #[test]
    fn test_datetime_regex() {
        assert!(DATETIME_REGEX.is_match("2024-01-31 08:00"));
        assert!(DATETIME_REGEX.is_match("2024-01-31T08:00"));
        assert!(DATETIME_REGEX.is_match("2024-01-31 08:00:00"));
        assert!(!DATETIME_REGEX.is_match("2024-01-31"));
        assert!(!DATETIME_REGEX.is_match("2024-01-31 8:00"));
    }
}
