//! Last tier of AP resolution: reward-drop CSV exports
//!
//! Exports live in `<screenshots>/<campaign>/*.csv`, one row per dropped or
//! purchased item: `<anything>,<item name>,<amount>[,...]`. There is no header
//! row and the writer's locale decides the encoding.

use crate::encoding::{decode_first, CSV_ENCODINGS};
use crate::file_discovery::discover_files;
use crate::numeric::parse_decimal;
use csv::ReaderBuilder;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("invalid digits regex"))
}

/// Sums AP rows across one campaign's CSV exports
#[derive(Debug, Clone)]
pub struct CsvFallback {
    screenshots_dir: PathBuf,
}

impl CsvFallback {
    pub fn new(screenshots_dir: impl Into<PathBuf>) -> Self {
        Self {
            screenshots_dir: screenshots_dir.into(),
        }
    }

    pub fn campaign_dir(&self, campaign: &str) -> PathBuf {
        self.screenshots_dir.join(campaign)
    }

    /// Total AP across the campaign's exports; 0 when there are none
    pub fn scan(&self, campaign: &str) -> u64 {
        let dir = self.campaign_dir(campaign);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No export directory for campaign");
            return 0;
        }

        let mut total: u64 = 0;
        for path in discover_csv_files(&dir) {
            match scan_file(&path) {
                Some(amount) => total = total.saturating_add(amount),
                None => debug!(path = %path.display(), "Unreadable export, skipping"),
            }
        }
        total
    }
}

/// `*.csv` files directly in `dir`, case-insensitive, in path order
fn discover_csv_files(dir: &Path) -> Vec<PathBuf> {
    discover_files(dir, &["csv".to_string()])
}

/// AP in one export, or `None` if the file cannot be read or decoded
pub fn scan_file(path: &Path) -> Option<u64> {
    let bytes = fs::read(path).ok()?;
    let (text, encoding) = decode_first(&bytes, CSV_ENCODINGS)?;
    debug!(path = %path.display(), encoding = encoding.name(), "Decoded export");
    Some(scan_rows(&text))
}

/// Sum the AP rows of decoded CSV text. Malformed records are skipped.
pub fn scan_rows(text: &str) -> u64 {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .flatten()
        .filter(|record| record.len() >= 3)
        .filter_map(|record| row_amount(&record[1], &record[2]))
        .fold(0u64, u64::saturating_add)
}

/// AP carried by one row, if its item is an action point item
pub fn row_amount(item_name: &str, item_amount: &str) -> Option<u64> {
    if !is_action_point_item(item_name) {
        return None;
    }
    let digits = digits_re()
        .find(item_amount)
        .or_else(|| digits_re().find(item_name))?;
    parse_decimal(digits.as_str())
}

/// "Action Point", "action_points", "ActionPoint" and the like
pub fn is_action_point_item(item_name: &str) -> bool {
    let name = item_name.to_lowercase();
    (name.contains("action") && name.contains("point")) || name.contains("actionpoint")
}
