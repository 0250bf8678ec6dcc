// Live progress display for a running check

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use sitecheck_scanner::{CheckResults, ProgressReporter, ProgressUpdate, StatusHistogram};

/// A bar for processed/total plus lines for the status histogram, the next
/// URLs in the queue, and the most recent failures.
pub struct ProgressTable {
    bar: ProgressBar,
    histogram_line: ProgressBar,
    upcoming_line: ProgressBar,
    failures_line: ProgressBar,
}

impl ProgressTable {
    /// Draws on `multi`; print through `multi.suspend` while the table is live.
    pub fn new(multi: &MultiProgress, total: usize) -> Self {
        let bar = multi.add(ProgressBar::new(total as u64));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.set_message("Starting check...");

        let line = |prefix: &'static str| {
            let pb = multi.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix:.bold} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_prefix(prefix);
            pb
        };

        let histogram_line = line("Statuses:");
        let upcoming_line = line("Next:    ");
        let failures_line = line("Not OK:  ");

        Self {
            bar,
            histogram_line,
            upcoming_line,
            failures_line,
        }
    }
}

impl ProgressReporter for ProgressTable {
    fn report(&self, update: &ProgressUpdate<'_>) {
        self.bar.set_position(update.processed as u64);
        self.bar
            .set_message(format!("{} {}", colorize_status(update.status), update.url));

        self.histogram_line
            .set_message(format_histogram(update.histogram));

        let upcoming = if update.upcoming.is_empty() {
            "(queue empty)".to_string()
        } else {
            update.upcoming.join("  ")
        };
        self.upcoming_line.set_message(upcoming);

        let recent: Vec<String> = update
            .non_success
            .iter()
            .rev()
            .take(3)
            .map(|r| format!("{} {}", colorize_status(r.status), r.url))
            .collect();
        self.failures_line.set_message(format!(
            "{} total  {}",
            update.non_success.len(),
            recent.join("  ")
        ));
    }

    fn finish(&self, results: &CheckResults) {
        self.upcoming_line.finish_and_clear();
        self.histogram_line
            .finish_with_message(format_histogram(&results.histogram));
        self.failures_line
            .finish_with_message(format!("{} total", results.non_success.len()));
        self.bar.finish_with_message(format!(
            "Check complete! {} URLs processed",
            results.processed
        ));
    }
}

/// Status code colored by class.
pub fn colorize_status(status: u16) -> String {
    let text = status.to_string();
    match status {
        200 => text.green().to_string(),
        100..=299 => text.white().to_string(),
        300..=399 => text.cyan().to_string(),
        400..=499 => text.yellow().to_string(),
        500..=599 => text.red().to_string(),
        _ => text,
    }
}

/// `200: 12  404: 3`, in ascending status order.
pub fn format_histogram(histogram: &StatusHistogram) -> String {
    if histogram.is_empty() {
        return "-".to_string();
    }
    histogram
        .iter()
        .map(|(status, count)| format!("{}: {}", colorize_status(status), count))
        .collect::<Vec<_>>()
        .join("  ")
}
