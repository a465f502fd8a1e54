#![allow(dead_code)]

use anyhow::Result;
use chrono::{Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

/// Temporary automation install with the standard `log/` and `screenshots/` layout
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join("log").join("cl1"))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_stats(&self, json: &str) -> Result<PathBuf> {
        let path = self.root().join("log").join("cl1").join("cl1_monthly.json");
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn write_log(&self, name: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.root().join("log").join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn write_csv(&self, campaign: &str, name: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let dir = self.root().join("screenshots").join(campaign);
        fs::create_dir_all(&dir)?;
        let path = dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Local noon on the 15th of the given month
pub fn mid_month(year: i32, month: u32) -> SystemTime {
    let at = Local
        .with_ymd_and_hms(year, month, 15, 12, 0, 0)
        .single()
        .expect("unambiguous local time");
    SystemTime::from(at)
}

pub fn set_mtime(path: &Path, time: SystemTime) -> Result<()> {
    let file = fs::File::options().write(true).open(path)?;
    file.set_modified(time)?;
    Ok(())
}

/// One confirmed bulk purchase: `base * multiplier` AP
pub fn purchase_log(base: u64, multiplier: u64) -> String {
    format!(
        "2024-05-01 12:00:00.001 | INFO | Click ActionPoint{base}_{multiplier}x\n\
         2024-05-01 12:00:01.120 | INFO | Shop buy finished\n"
    )
}
