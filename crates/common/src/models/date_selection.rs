use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date `{0}`: expected a calendar date in YYYY-MM-DD form")]
pub struct InvalidDateError(pub String);

/// The date a prediction is requested for, kept exactly as the user entered it.
///
/// Any string can be stored; syntax is only checked by [`DateSelection::parse`],
/// which the request path calls before anything goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateSelection(String);

impl DateSelection {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strict `YYYY-MM-DD`: zero padded, four digit year, real calendar day.
    pub fn parse(&self) -> Result<NaiveDate, InvalidDateError> {
        let raw = self.0.as_str();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .filter(|date| date.format(DATE_FORMAT).to_string() == raw)
            .ok_or_else(|| InvalidDateError(self.0.clone()))
    }

    pub fn is_valid(&self) -> bool {
        self.parse().is_ok()
    }
}

impl Default for DateSelection {
    fn default() -> Self {
        Self::today()
    }
}

impl From<NaiveDate> for DateSelection {
    fn from(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }
}

impl From<String> for DateSelection {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DateSelection {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_iso_dates() {
        let date = DateSelection::new("2023-10-01").parse().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());

        assert!(DateSelection::new("2024-02-29").is_valid(), "leap day should be accepted");
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        for raw in ["", "2023-1-5", "2023/10/01", "01-10-2023", " 2023-10-01", "2023-02-30", "+2023-10-01", "tomorrow"] {
            let err = DateSelection::new(raw).parse().unwrap_err();
            assert_eq!(err, InvalidDateError(raw.to_string()), "`{raw}` should be rejected");
        }
    }

    #[test]
    fn test_today_is_well_formed() {
        let today = DateSelection::today();
        assert!(today.is_valid());
        assert_eq!(today.as_str().len(), 10);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&DateSelection::new("2023-10-01")).unwrap();
        assert_eq!(json, "\"2023-10-01\"");
    }
}
