//! # MonthKey
//!
//! The "YYYY-MM" bucket incidents are grouped under for statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Month, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A calendar month. Orders chronologically (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    /// 1..=12
    month: u32,
}

impl MonthKey {
    /// Accepts any month chrono can represent, so every key built by
    /// [`MonthKey::from_datetime`] is also constructible here.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidInput(format!("month {month} out of range")));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidInput(format!("year {year} out of range")));
        }
        Ok(Self { year, month })
    }

    /// The month containing `at`, in the timestamp's own time zone.
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self { year: at.year(), month: at.month() }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based calendar slot (January = 0).
    pub fn calendar_index(&self) -> usize {
        (self.month - 1) as usize
    }

    /// The month immediately before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Human label such as "October 2024".
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        format!("{name} {}", self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidInput(format!("malformed month key '{s}'"));
        // years are zero-padded to at least four characters and may be longer
        let (year, month) = s.rsplit_once('-').ok_or_else(invalid)?;
        if year.len() < 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_and_display() {
        let key: MonthKey = "2024-10".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 10);
        assert_eq!(key.to_string(), "2024-10");
        assert_eq!(key.label(), "October 2024");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("October".parse::<MonthKey>().is_err());
        assert!("24-10".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_five_digit_year_round_trips() {
        let at = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        let key = MonthKey::from_datetime(&at);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"10000-01\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert_eq!(MonthKey::new(10000, 1).unwrap(), key);
    }

    #[test]
    fn test_year_zero_is_padded() {
        let key = MonthKey::new(0, 7).unwrap();
        assert_eq!(key.to_string(), "0000-07");
        assert_eq!("0000-07".parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn test_previous_wraps_year() {
        let jan = MonthKey::new(2025, 1).unwrap();
        assert_eq!(jan.previous(), MonthKey::new(2024, 12).unwrap());
    }

    #[test]
    fn test_from_datetime_and_order() {
        let at = Utc.with_ymd_and_hms(2024, 10, 31, 23, 59, 0).unwrap();
        let oct = MonthKey::from_datetime(&at);
        assert_eq!(oct.to_string(), "2024-10");
        assert!(oct < MonthKey::new(2024, 11).unwrap());
        assert!(oct > MonthKey::new(2023, 12).unwrap());
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2024, 3).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
