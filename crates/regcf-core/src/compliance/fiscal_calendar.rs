use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::RegCfError;
use crate::RegCfResult;

/// Days per month with February allowing the leap day.
const MAX_DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Annual close date of an issuer, as a month-day pair independent of year.
///
/// Parsed from and rendered as `"MM-DD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiscalYearEnd {
    month: u32,
    day: u32,
}

impl FiscalYearEnd {
    pub fn new(month: u32, day: u32) -> RegCfResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(RegCfError::InvalidFiscalYearEnd(format!(
                "month {month} is outside 1-12"
            )));
        }
        let max_day = MAX_DAYS_IN_MONTH[(month - 1) as usize];
        if day == 0 || day > max_day {
            return Err(RegCfError::InvalidFiscalYearEnd(format!(
                "day {day} is outside 1-{max_day} for month {month}"
            )));
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The instance of this fiscal year end that falls in calendar `year`.
    ///
    /// A Feb 29 year end lands on Feb 28 in non-leap years. Years outside
    /// chrono's range saturate to `NaiveDate::MIN` / `NaiveDate::MAX`.
    pub fn date_in(&self, year: i32) -> NaiveDate {
        if year > NaiveDate::MAX.year() {
            return NaiveDate::MAX;
        }
        if year < NaiveDate::MIN.year() {
            return NaiveDate::MIN;
        }
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month, self.day - 1))
            .unwrap_or(if year == NaiveDate::MAX.year() {
                NaiveDate::MAX
            } else {
                NaiveDate::MIN
            })
    }

    /// Parse an optional configured value, falling back to December 31.
    pub fn parse_or_default(value: Option<&str>) -> RegCfResult<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.parse(),
            None => Ok(Self::default()),
        }
    }
}

impl Default for FiscalYearEnd {
    fn default() -> Self {
        Self { month: 12, day: 31 }
    }
}

impl FromStr for FiscalYearEnd {
    type Err = RegCfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, day) = s.trim().split_once('-').ok_or_else(|| {
            RegCfError::InvalidFiscalYearEnd(format!("'{s}' is not in MM-DD form"))
        })?;
        let month = parse_part(month).ok_or_else(|| {
            RegCfError::InvalidFiscalYearEnd(format!("'{s}' has a non-numeric month"))
        })?;
        let day = parse_part(day).ok_or_else(|| {
            RegCfError::InvalidFiscalYearEnd(format!("'{s}' has a non-numeric day"))
        })?;
        Self::new(month, day)
    }
}

/// One or two ASCII digits; signs and whitespace inside a part are rejected.
fn parse_part(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl std::fmt::Display for FiscalYearEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for FiscalYearEnd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FiscalYearEnd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
