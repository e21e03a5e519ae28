//! Calendar date parsing and serialization.
//!
//! Form input carries dates as `YYYY-MM-DD`. Snapshots written by older
//! browser exports carry full RFC 3339 timestamps (`2024-06-10T00:00:00.000Z`)
//! for the same fields, so both shapes are accepted on the way in. Dates are
//! always written back as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate};

use crate::error::{DocketError, DocketResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in either accepted shape.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a form field, naming the field in the error.
pub fn parse_form_date(field: &str, raw: &str) -> DocketResult<NaiveDate> {
    parse_date_str(raw).ok_or_else(|| {
        DocketError::validation(format!("{field} must be a date in YYYY-MM-DD format, got '{raw}'"))
    })
}

/// Parse an optional form field. Blank input means "no date".
pub fn parse_optional_form_date(field: &str, raw: Option<&str>) -> DocketResult<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_form_date(field, value).map(Some),
    }
}

/// Serde adapter for required calendar dates.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(super::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_str(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{raw}'")))
    }
}

/// Serde adapter for optional calendar dates. `null` and absent both mean `None`.
pub mod option_calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(&d.format(super::DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse_date_str(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_date_str("2024-06-10"), Some(ymd(2024, 6, 10)));
        assert_eq!(parse_date_str(" 2024-06-10 "), Some(ymd(2024, 6, 10)));
    }

    #[test]
    fn test_browser_timestamp() {
        assert_eq!(parse_date_str("2024-06-10T00:00:00.000Z"), Some(ymd(2024, 6, 10)));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_date_str("10/06/2024"), None);
        assert_eq!(parse_date_str("2024-02-30"), None);
        assert!(parse_form_date("openDate", "soon").is_err());
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(parse_optional_form_date("dueDate", None).unwrap(), None);
        assert_eq!(parse_optional_form_date("dueDate", Some("  ")).unwrap(), None);
        assert_eq!(
            parse_optional_form_date("dueDate", Some("2024-06-11")).unwrap(),
            Some(ymd(2024, 6, 11))
        );
    }
}
