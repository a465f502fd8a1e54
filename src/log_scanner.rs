//! Second tier of AP resolution: the automation's own text logs
//!
//! An AP purchase shows up in the log as a click on an `ActionPoint<base>`
//! button (optionally `ActionPoint<base>_<n>x` for a bulk buy), followed a few
//! lines later by the shop reporting that the purchase went through. Clicks
//! without a confirmation nearby are abandoned or failed purchases and do not
//! count.

use crate::encoding::decode_log_text;
use crate::file_discovery::{discover_files, normalize_extension};
use crate::month::MonthKey;
use crate::numeric::parse_decimal;
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Lines searched for a confirmation, counting the click line itself
pub const DEFAULT_CONFIRMATION_WINDOW: usize = 25;

const SPEND_MARKER: &str = "ActionPoint";
const CLICK_MARKER: &str = "Click";
const CONFIRM_MARKER: &str = "Shop buy finished";

fn action_point_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"ActionPoint(\d+)(?:_(\d+)x)?").expect("invalid action point regex")
    })
}

/// Scans one directory of log files for confirmed AP purchases
#[derive(Debug, Clone)]
pub struct LogScanner {
    log_dir: PathBuf,
    extensions: Vec<String>,
    window: usize,
}

impl LogScanner {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            extensions: vec!["log".to_string(), "txt".to_string()],
            window: DEFAULT_CONFIRMATION_WINDOW,
        }
    }

    /// Extensions may be given with or without the leading dot
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .iter()
            .filter_map(|ext| normalize_extension(ext))
            .collect();
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Total AP bought in `month`, or `None` when the logs show no purchase.
    ///
    /// The total is accumulated over every file before the zero check, so a
    /// zero means "no evidence", not "confirmed zero".
    pub fn scan(&self, month: &MonthKey) -> Option<u64> {
        let mut total: u64 = 0;
        let mut files_scanned = 0usize;

        for path in self.discover_log_files() {
            if !self.should_scan_file(&path, month) {
                trace!(path = %path.display(), "Skipping log from another month");
                continue;
            }

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Unreadable log file");
                    continue;
                }
            };
            let text = decode_log_text(&bytes);
            let amount = scan_text(&text, self.window);
            files_scanned += 1;

            debug!(path = %path.display(), amount, "Scanned log file");
            total = total.saturating_add(amount);
        }

        debug!(month = %month, files_scanned, total, "Log scan finished");
        (total > 0).then_some(total)
    }

    /// Regular files directly under the log directory with a log-like
    /// extension, in path order. A missing directory yields nothing.
    pub fn discover_log_files(&self) -> Vec<PathBuf> {
        discover_files(&self.log_dir, &self.extensions)
    }

    /// Files modified in another month are skipped. A file whose modification
    /// time cannot be read is scanned anyway.
    pub fn should_scan_file(&self, path: &Path, month: &MonthKey) -> bool {
        match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => month.contains(&DateTime::<Local>::from(modified)),
            Err(_) => true,
        }
    }
}

/// Sum the AP of every confirmed purchase in one log's text.
pub fn scan_text(text: &str, window: usize) -> u64 {
    let lines = split_lines(text);
    let window = window.max(1);
    let mut total: u64 = 0;

    for (idx, line) in lines.iter().enumerate() {
        if !(line.contains(SPEND_MARKER) && line.contains(CLICK_MARKER)) {
            continue;
        }

        let end = (idx + window).min(lines.len());
        if !lines[idx..end].iter().any(|l| l.contains(CONFIRM_MARKER)) {
            continue;
        }

        if let Some(amount) = parse_purchase(line) {
            total = total.saturating_add(amount);
        }
    }

    total
}

/// Line boundaries: `\n`, `\r\n`, a lone `\r`, and the vertical tab, form
/// feed, file/group/record separators, NEL, and the Unicode line and paragraph
/// separators. A trailing boundary does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_boundary(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// `ActionPoint<base>[_<n>x]` on a line → `base * n`
pub fn parse_purchase(line: &str) -> Option<u64> {
    let caps = action_point_re().captures(line)?;
    let base = parse_decimal(caps.get(1)?.as_str())?;
    let multiplier = match caps.get(2) {
        Some(m) => parse_decimal(m.as_str())?,
        None => 1,
    };
    base.checked_mul(multiplier)
}
