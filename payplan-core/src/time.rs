//! Time utilities: resolving "today" in the user's timezone.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::PlanError;

/// Parse an IANA timezone name like "Asia/Kolkata".
pub fn parse_timezone(tz: &str) -> Result<Tz, PlanError> {
    tz.parse()
        .map_err(|_| PlanError::InvalidTimezone(tz.to_string()))
}

/// Calendar date of `instant` as seen in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: &str) -> Result<NaiveDate, PlanError> {
    let tz = parse_timezone(tz)?;
    Ok(instant.with_timezone(&tz).date_naive())
}

/// Today's date in `tz`.
pub fn today_in(tz: &str) -> Result<NaiveDate, PlanError> {
    local_date(Utc::now(), tz)
}

/// Parse a "YYYY-MM-DD" date.
pub fn parse_date(s: &str) -> Result<NaiveDate, PlanError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| PlanError::InvalidDate(s.to_string()))
}

/// Short display form, e.g. "Feb 8".
pub fn format_day(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_date_crosses_midnight() {
        // 20:00 UTC is already the next day in India (UTC+5:30)
        let instant = Utc.with_ymd_and_hms(2024, 2, 14, 20, 0, 0).unwrap();
        let date = local_date(instant, "Asia/Kolkata").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());

        let utc = local_date(instant, "UTC").unwrap();
        assert_eq!(utc, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    }

    #[test]
    fn test_invalid_timezone() {
        let err = local_date(Utc::now(), "Mars/Olympus").unwrap_err();
        assert_eq!(err, PlanError::InvalidTimezone("Mars/Olympus".to_string()));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-25 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 25).unwrap()
        );
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("25/02/2024").is_err());
    }

    #[test]
    fn test_format_day() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_day(d), "Mar 1");
    }
}
