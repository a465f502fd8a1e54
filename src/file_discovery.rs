//! Non-recursive discovery of data files by extension

use glob::{glob_with, MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// `".LOG"` → `"log"`; an extension that is empty once dots are trimmed is `None`
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

/// Regular files directly in `dir` whose extension matches one of
/// `extensions` (case-insensitive), in path order.
///
/// Dotfiles such as `.log` have no extension and never match. A missing
/// directory yields nothing.
pub fn discover_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let extensions: Vec<String> = extensions
        .iter()
        .filter_map(|ext| normalize_extension(ext))
        .collect();
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let base = Pattern::escape(&dir.to_string_lossy());

    let mut files = BTreeSet::new();
    for ext in &extensions {
        let pattern = format!("{base}{MAIN_SEPARATOR}*.{}", Pattern::escape(ext));
        if let Ok(paths) = glob_with(&pattern, options) {
            files.extend(
                paths
                    .flatten()
                    .filter(|p| p.is_file() && has_extension(p, &extensions)),
            );
        }
    }

    files.into_iter().collect()
}

/// Extension as the path itself reports it, so `.log` (a dotfile) has none
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|actual| extensions.iter().any(|ext| actual.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
