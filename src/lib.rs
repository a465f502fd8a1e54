//! opsi-stats Library
//!
//! Monthly statistics for the CL1 / Operation Siren farming task, read from the
//! files an automation process leaves behind.
//!
//! ## Core Features
//!
//! - **Monthly summary**: battle and Akashi encounter counts from the stats store
//! - **AP estimation**: action points spent per campaign, resolved through an
//!   ordered fallback over the stats store, the text logs and drop CSV exports
//! - **Best-effort reads**: missing or malformed inputs degrade to empty data,
//!   never to an error
//!
//! ## Architecture Overview
//!
//! - [`analyzer`] - [`OpsiMonthStats`], the entry point tying the sources together
//! - [`store`] - Read-only stats JSON document and lenient integer coercion
//! - [`structured`] - AP figures recorded in the stats store
//! - [`log_scanner`] - Confirmed AP purchases in text logs
//! - [`csv_fallback`] - AP rows in drop exports
//! - [`encoding`] - Ordered multi-encoding text decoding
//! - [`file_discovery`] - Data files by extension
//! - [`numeric`] - Unicode decimal digit parsing
//! - [`month`] - `YYYY-MM` month keys
//! - [`models`] - Serializable report types
//! - [`display`] - Terminal and JSON rendering
//! - [`config`] - Configuration with file and environment overrides
//! - [`logging`] - Structured logging setup
//!
//! ```rust,no_run
//! # fn example() -> anyhow::Result<()> {
//! let ap = opsi_stats::compute_monthly_cl1_akashi_ap("/srv/alas", None, None, None)?;
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod csv_fallback;
pub mod display;
pub mod encoding;
pub mod file_discovery;
pub mod log_scanner;
pub mod logging;
pub mod models;
pub mod month;
pub mod numeric;
pub mod store;
pub mod structured;

pub use analyzer::{OpsiMonthStats, StatsPaths};
pub use models::{ApEstimate, ApSource, MonthSummary};
pub use month::MonthKey;
pub use store::StatsStore;

use std::path::Path;

/// Campaign whose exports are scanned when none is named
pub const DEFAULT_CAMPAIGN: &str = "opsi_akashi";

/// AP spent in a month under the standard layout at `root`
pub fn compute_monthly_cl1_akashi_ap(
    root: impl AsRef<Path>,
    year: Option<i32>,
    month: Option<u32>,
    campaign: Option<&str>,
) -> anyhow::Result<u64> {
    OpsiMonthStats::from_root(root).compute_monthly_cl1_akashi_ap(year, month, campaign)
}
