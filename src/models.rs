//! Report types
//!
//! - [`MonthSummary`] - battle and encounter counts for a month, plus the raw store
//! - [`ApEstimate`] - resolved AP figure and the tier that produced it
//! - [`ApSource`] - which data source answered

use crate::month::MonthKey;
use crate::store::StatsStore;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub total_battles: i64,
    pub akashi_encounters: i64,
    pub raw: StatsStore,
}

/// Data source that produced an AP figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApSource {
    /// Precomputed or itemized figure in the stats store
    Structured,
    /// Confirmed purchases found in the text logs
    Logs,
    /// Drop exports; also reported when nothing was found anywhere
    Csv,
}

impl ApSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApSource::Structured => "structured",
            ApSource::Logs => "logs",
            ApSource::Csv => "csv",
        }
    }
}

impl fmt::Display for ApSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApEstimate {
    pub month: MonthKey,
    pub campaign: String,
    pub amount: u64,
    pub source: ApSource,
}
