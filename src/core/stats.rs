use crate::logging::{log, LogLevel};
use crate::utils;
use std::collections::BTreeMap;
use std::time::Duration;

pub const BUCKET_SETUP: &str = "Bucket Setup";
pub const CATEGORIES: &str = "Categories";
pub const LISTING_PAGES: &str = "Listing Pages";
pub const CARDS: &str = "Cards";
pub const IMAGE_UPLOADS: &str = "Image Uploads";
pub const METADATA_EXPORT: &str = "Metadata Export";

const SUMMARY_ORDER: [&str; 6] = [
    BUCKET_SETUP,
    CATEGORIES,
    LISTING_PAGES,
    CARDS,
    IMAGE_UPLOADS,
    METADATA_EXPORT,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub ok: usize,
    pub fail: usize,
    pub skip_or_empty: usize,
    pub total_tasks: usize,
}

impl CategoryStats {
    pub fn add_ok(&mut self) {
        self.ok += 1;
    }
    pub fn add_fail(&mut self) {
        self.fail += 1;
    }
    pub fn add_skip(&mut self) {
        self.skip_or_empty += 1;
    }
    pub fn add_total(&mut self, n: usize) {
        self.total_tasks += n;
    }
    pub fn set_total(&mut self, total: usize) {
        self.total_tasks = total;
    }
    pub fn get_processed(&self) -> usize {
        self.ok + self.fail + self.skip_or_empty
    }
}

pub type RunStats = BTreeMap<String, CategoryStats>;

pub fn initialize_stats() -> RunStats {
    SUMMARY_ORDER
        .iter()
        .map(|name| (name.to_string(), CategoryStats::default()))
        .collect()
}

/// Counter for `phase`, created on first use.
pub fn phase<'a>(stats: &'a mut RunStats, name: &str) -> &'a mut CategoryStats {
    stats.entry(name.to_string()).or_default()
}

pub fn print_summary(stats: &RunStats, categories: &[String], duration: Duration) {
    let sep = "=".repeat(60);
    let title = format!("Run Summary ({} Categories)", categories.len());
    println!("\n{}\n{:^60}\n{}", sep, title, sep);
    if !categories.is_empty() {
        println!("Categories:        {}", categories.join(", "));
    }
    println!("Total Run Time:    {}", utils::format_elapsed(duration));
    println!("{}", "-".repeat(60));

    println!(
        "{:<17} {:<8} {:<12} {:<8} {:<8}",
        "Phase", "OK", "Skip/Empty", "Fail", "Total"
    );
    println!("{}", "-".repeat(60));

    for name in SUMMARY_ORDER {
        if let Some(s) = stats.get(name) {
            println!(
                "{:<17} {:<8} {:<12} {:<8} {:<8}",
                name, s.ok, s.skip_or_empty, s.fail, s.total_tasks
            );
        }
    }
    println!("{}", sep);

    log_overall_status(stats);

    let end_ts_str = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    log(
        LogLevel::Step,
        &format!("--- Run Finished at {} ---", end_ts_str),
    );
}

fn total_failures(stats: &RunStats) -> usize {
    stats.values().map(|s| s.fail).sum()
}

fn log_overall_status(stats: &RunStats) {
    let failures = total_failures(stats);
    let cards = stats.get(CARDS).map_or(0, |s| s.ok);

    if failures > 0 {
        log(
            LogLevel::Error,
            &format!(
                "Run completed with {} failed step(s). Check logs.",
                failures
            ),
        );
    } else if cards == 0 {
        log(
            LogLevel::Warning,
            "Run completed, but no artworks were found in the selected categories.",
        );
    } else {
        log(LogLevel::Success, "Run completed successfully.");
    }
}

/// Bucket setup failures are reported but never change the exit code.
pub fn determine_exit_code(stats: &RunStats) -> i32 {
    let failures: usize = stats
        .iter()
        .filter(|(name, _)| name.as_str() != BUCKET_SETUP)
        .map(|(_, s)| s.fail)
        .sum();
    if failures > 0 {
        1
    } else {
        0
    }
}
