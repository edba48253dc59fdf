//! Calendar dates in the comic archive's filename order.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, TagError};

/// A comic day, addressed as (year, month, day).
///
/// Ordering is calendar order. The canonical serialized form is the 8-digit
/// `YYYYMMDD` datestamp used in comic filenames, whose lexical order agrees
/// with the calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComicDate(NaiveDate);

impl ComicDate {
    /// Build a date from its parts, rejecting days that don't exist.
    ///
    /// # Examples
    /// ```
    /// use autonifty_tags::ComicDate;
    ///
    /// assert!(ComicDate::from_ymd(2024, 2, 29).is_ok());
    /// assert!(ComicDate::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| TagError::InvalidDate(format!("{year:04}{month:02}{day:02}")))
    }

    /// Parse an 8-digit `YYYYMMDD` datestamp.
    pub fn parse_datestamp(stamp: &str) -> Result<Self> {
        if stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TagError::InvalidDate(stamp.to_string()));
        }

        let invalid = |_| TagError::InvalidDate(stamp.to_string());
        let year = stamp[0..4].parse().map_err(invalid)?;
        let month = stamp[4..6].parse().map_err(invalid)?;
        let day = stamp[6..8].parse().map_err(invalid)?;

        Self::from_ymd(year, month, day).map_err(|_| TagError::InvalidDate(stamp.to_string()))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The canonical `YYYYMMDD` form.
    #[must_use]
    pub fn datestamp(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// The underlying chrono date, for formatting and arithmetic.
    #[must_use]
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ComicDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ComicDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for ComicDate {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_datestamp(s)
    }
}
