//! Output Formatting
//!
//! Renders [`MonthSummary`] and [`ApEstimate`] either as colored terminal text
//! or as pretty JSON. The `render_*` functions build the text so it can be
//! checked without a terminal; the `display_*` functions print it.

use crate::models::*;
use colored::Colorize;
use serde::Serialize;

pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn display_summary(&self, summary: &MonthSummary, json_output: bool) {
        if json_output {
            print_json(summary);
        } else {
            println!("{}", self.render_summary(summary));
        }
    }

    pub fn display_ap(&self, estimate: &ApEstimate, json_output: bool) {
        if json_output {
            print_json(estimate);
        } else {
            println!("{}", self.render_ap(estimate));
        }
    }

    pub fn render_summary(&self, summary: &MonthSummary) -> String {
        let mut out = header(&format!("CL1 Monthly Summary - {}", summary.month));
        out.push_str(&format!(
            "\n{} {} battles\n",
            "⚔".bright_yellow(),
            summary.total_battles.to_string().bright_white().bold()
        ));
        out.push_str(&format!(
            "{} {} Akashi encounters\n",
            "🛒".bright_yellow(),
            summary.akashi_encounters.to_string().bright_white().bold()
        ));
        if summary.raw.is_empty() {
            out.push_str(&format!("{}\n", "No stats recorded yet".dimmed()));
        }
        out
    }

    pub fn render_ap(&self, estimate: &ApEstimate) -> String {
        let mut out = header(&format!(
            "Action Points Spent - {} ({})",
            estimate.month, estimate.campaign
        ));
        out.push_str(&format!(
            "\n{} {} AP {}\n",
            "⚡".bright_yellow(),
            estimate.amount.to_string().bright_green().bold(),
            format!("(from {})", estimate.source).bright_cyan()
        ));
        out
    }
}

fn header(title: &str) -> String {
    format!(
        "{}\n{}\n{}",
        "=".repeat(60).bright_cyan(),
        title.bright_white().bold(),
        "=".repeat(60).bright_cyan()
    )
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => println!("{}", json_str),
        Err(e) => eprintln!("Error serializing output to JSON: {}", e),
    }
}
