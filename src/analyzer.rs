//! Monthly statistics engine
//!
//! [`OpsiMonthStats`] owns the locations of the three data sources and answers
//! the two questions asked of them: the monthly summary, and how many action
//! points were spent on a campaign in a month.
//!
//! ## AP resolution
//!
//! Tiers are tried in order until one answers:
//!
//! 1. **Stats store**: a precomputed `YYYY-MM-akashi-ap` value, or the sum of
//!    `YYYY-MM-akashi-ap-entries`. Any hit is final, including zero.
//! 2. **Text logs**: confirmed `ActionPoint` purchases in log files modified
//!    during the month. Only a positive total is final.
//! 3. **Drop exports**: AP rows in the campaign's CSV exports. Always final.
//!
//! Everything is read fresh on each call and nothing is written back, so
//! repeated calls over unchanged files return the same figures.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use opsi_stats::OpsiMonthStats;
//!
//! # fn example() -> anyhow::Result<()> {
//! let stats = OpsiMonthStats::from_root("/srv/alas");
//! let summary = stats.summary(Some(2024), Some(5))?;
//! let ap = stats.compute_monthly_cl1_akashi_ap(Some(2024), Some(5), None)?;
//! println!("{}: {} battles, {} AP", summary.month, summary.total_battles, ap);
//! # Ok(())
//! # }
//! ```

use crate::config::{validate_campaign, Config};
use crate::csv_fallback::CsvFallback;
use crate::log_scanner::LogScanner;
use crate::models::{ApEstimate, ApSource, MonthSummary};
use crate::month::MonthKey;
use crate::store::StatsStore;
use crate::structured::lookup_ap;
use crate::DEFAULT_CAMPAIGN;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Where each data source lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPaths {
    pub stats_file: PathBuf,
    pub log_directory: PathBuf,
    pub screenshots_directory: PathBuf,
}

impl StatsPaths {
    /// Standard layout under an automation install root
    pub fn under_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            stats_file: root.join("log").join("cl1").join("cl1_monthly.json"),
            log_directory: root.join("log"),
            screenshots_directory: root.join("screenshots"),
        }
    }
}

pub struct OpsiMonthStats {
    paths: StatsPaths,
    log_scanner: LogScanner,
    csv_fallback: CsvFallback,
    default_campaign: String,
}

impl OpsiMonthStats {
    pub fn new(paths: StatsPaths) -> Self {
        Self {
            log_scanner: LogScanner::new(&paths.log_directory),
            csv_fallback: CsvFallback::new(&paths.screenshots_directory),
            default_campaign: DEFAULT_CAMPAIGN.to_string(),
            paths,
        }
    }

    pub fn from_root(root: impl AsRef<Path>) -> Self {
        Self::new(StatsPaths::under_root(root))
    }

    pub fn from_config(config: &Config) -> Self {
        let paths = StatsPaths {
            stats_file: config.paths.stats_file(),
            log_directory: config.paths.log_directory(),
            screenshots_directory: config.paths.screenshots_directory(),
        };
        let mut stats = Self::new(paths);
        stats.log_scanner = stats
            .log_scanner
            .with_extensions(config.scan.log_extensions.clone())
            .with_window(config.scan.confirmation_window);
        stats.default_campaign = config.scan.default_campaign.clone();
        stats
    }

    pub fn paths(&self) -> &StatsPaths {
        &self.paths
    }

    pub fn default_campaign(&self) -> &str {
        &self.default_campaign
    }

    /// Current contents of the stats store; empty if missing or malformed
    pub fn load_raw(&self) -> StatsStore {
        StatsStore::load(&self.paths.stats_file)
    }

    /// Battle and Akashi encounter counts for a month (default: current month)
    pub fn summary(&self, year: Option<i32>, month: Option<u32>) -> Result<MonthSummary> {
        let key = MonthKey::from_parts(year, month)?;
        Ok(self.summary_for(&key))
    }

    pub fn summary_for(&self, key: &MonthKey) -> MonthSummary {
        let raw = self.load_raw();
        MonthSummary {
            month: *key,
            total_battles: raw.int_or_zero(&key.to_string()),
            akashi_encounters: raw.int_or_zero(&key.akashi_key()),
            raw,
        }
    }

    /// AP spent on `campaign` in a month. Month and year default to the
    /// current ones, the campaign to the configured default.
    pub fn compute_monthly_cl1_akashi_ap(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        campaign: Option<&str>,
    ) -> Result<u64> {
        let key = MonthKey::from_parts(year, month)?;
        let campaign = campaign.unwrap_or(&self.default_campaign);
        validate_campaign(campaign)?;
        Ok(self.resolve_ap(&key, campaign).amount)
    }

    /// Walk the tiers for one month and campaign, reporting which one answered
    pub fn resolve_ap(&self, key: &MonthKey, campaign: &str) -> ApEstimate {
        let _span = info_span!("resolve_ap", month = %key, campaign).entered();

        let (amount, source) = if let Some(value) = lookup_ap(&self.load_raw(), key) {
            (u64::try_from(value).unwrap_or(0), ApSource::Structured)
        } else if let Some(value) = self.log_scanner.scan(key) {
            (value, ApSource::Logs)
        } else {
            (self.csv_fallback.scan(campaign), ApSource::Csv)
        };

        info!(month = %key, campaign, source = %source, amount, "Resolved monthly AP");

        ApEstimate {
            month: *key,
            campaign: campaign.to_string(),
            amount,
            source,
        }
    }
}
