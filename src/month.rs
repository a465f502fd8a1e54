//! Calendar month keys
//!
//! Every figure in the stats store is filed under a `YYYY-MM` key. [`MonthKey`]
//! is the only way to build one, which keeps the zero padding and range checks
//! in a single place.

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(0..=9999).contains(&year) {
            bail!("Year must be between 0 and 9999, got {year}");
        }
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {month}");
        }
        Ok(Self { year, month })
    }

    /// The month containing the local wall-clock time
    pub fn current() -> Self {
        Self::containing(&Local::now())
    }

    pub fn containing<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Fill in whichever of `year` / `month` is missing from the current month
    pub fn from_parts(year: Option<i32>, month: Option<u32>) -> Result<Self> {
        let now = Self::current();
        Self::new(year.unwrap_or(now.year), month.unwrap_or(now.month))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        at.year() == self.year && at.month() == self.month
    }

    /// `YYYY-MM-akashi`: Akashi encounter count
    pub fn akashi_key(&self) -> String {
        format!("{self}-akashi")
    }

    /// `YYYY-MM-akashi-ap`: precomputed AP total
    pub fn akashi_ap_key(&self) -> String {
        format!("{self}-akashi-ap")
    }

    /// `YYYY-MM-akashi-ap-entries`: itemized AP purchases
    pub fn akashi_ap_entries_key(&self) -> String {
        format!("{self}-akashi-ap-entries")
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
