//! Progress reporting

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::checkpoint::CheckpointRequest;
use crate::error::{Result, WordlistError};
use crate::types::{FileReport, ProgressReport, ResumeMode, RunSummary, StartInfo};

/// Observer of a generation run. Every hook defaults to doing nothing.
///
/// Hooks are purely observational: they cannot alter what is generated.
pub trait ProgressReporter {
    fn on_start(&mut self, _info: &StartInfo) {}

    fn on_progress(&mut self, _report: &ProgressReport) {}

    fn on_file_complete(&mut self, _report: &FileReport) {}

    /// The cursor could not be saved after a file; a restart may redo work
    fn on_persist_failed(&mut self, _report: &FileReport, _error: &WordlistError) {}

    fn on_checkpoint(&mut self, _request: &CheckpointRequest, _outcome: &Result<()>) {}

    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Rate-limits progress samples to one per interval of wall-clock time
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    interval: Duration,
    last_report: Instant,
    pending: u64,
}

impl ProgressThrottle {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_report: start,
            pending: 0,
        }
    }

    /// Account for `count` new entries. Returns the speed in entries per
    /// second since the previous sample once the interval has elapsed.
    pub fn record(&mut self, count: u64, now: Instant) -> Option<f64> {
        self.pending += count;
        let elapsed = now.saturating_duration_since(self.last_report);
        if elapsed < self.interval {
            return None;
        }

        let secs = elapsed.as_secs_f64();
        let speed = if secs > 0.0 {
            self.pending as f64 / secs
        } else {
            0.0
        };
        self.pending = 0;
        self.last_report = now;
        Some(speed)
    }
}

/// Remaining time at the given speed, `None` while the speed is unknown
pub fn eta(remaining: u64, speed: f64) -> Option<Duration> {
    if speed > 0.0 && speed.is_finite() {
        Some(Duration::from_secs_f64(remaining as f64 / speed))
    } else {
        None
    }
}

/// `3725s` -> `01h02m05s`
pub fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs();
    format!("{:02}h{:02}m{:02}s", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Thousands separators: `17043520` -> `17,043,520`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Live terminal output: a progress bar redrawn in place plus one line per
/// finished file and checkpoint.
pub struct ConsoleReporter {
    bar: ProgressBar,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_start(&mut self, info: &StartInfo) {
        let style = ProgressStyle::with_template("🔧 {bar:50} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░");
        self.bar = ProgressBar::with_draw_target(Some(info.total), ProgressDrawTarget::stdout())
            .with_style(style)
            .with_position(info.next_index);

        match info.mode {
            ResumeMode::Fresh => self.bar.println("🚀 Starting fresh generation...\n"),
            ResumeMode::Resumed { last_written } => self.bar.println(format!(
                "📂 Resuming from position {} ({:.4}% complete)\n",
                format_count(last_written),
                info.percent_complete()
            )),
        }
    }

    fn on_progress(&mut self, report: &ProgressReport) {
        let eta = report.eta.map_or_else(|| "--h--m--s".to_string(), format_eta);
        self.bar.set_position(report.position);
        self.bar.set_message(format!(
            "{:.4}% │ File {:06} │ {:>10} / {:>10} │ Speed: {:>8.0}/s │ ETA: {}",
            report.percent(),
            report.file_number,
            format_count(report.position),
            format_count(report.total),
            report.speed,
            eta
        ));
    }

    fn on_file_complete(&mut self, report: &FileReport) {
        let name = report
            .path
            .file_name()
            .map_or_else(|| report.path.display().to_string(), |n| n.to_string_lossy().to_string());
        self.bar.println(format!(
            "✅ Completed: {} ({} entries) │ Total files: {}",
            name,
            format_count(report.entries),
            report.files_completed
        ));
    }

    fn on_persist_failed(&mut self, _report: &FileReport, error: &WordlistError) {
        self.bar.println(error.user_message());
    }

    fn on_checkpoint(&mut self, request: &CheckpointRequest, outcome: &Result<()>) {
        match outcome {
            Ok(()) => self.bar.println(format!(
                "🔄 Committed and pushed progress ({} files completed)",
                request.files_completed
            )),
            Err(e) => self.bar.println(e.user_message()),
        }
    }

    fn on_finish(&mut self, _summary: &RunSummary) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_waits_for_interval() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(Duration::from_millis(150), start);
        assert_eq!(throttle.record(100, start + Duration::from_millis(100)), None);
        assert_eq!(throttle.record(200, start + Duration::from_millis(149)), None);

        let speed = throttle.record(300, start + Duration::from_millis(150)).unwrap();
        assert!((speed - 4000.0).abs() < 1e-6);

        // counter resets after a sample
        let speed = throttle.record(50, start + Duration::from_millis(400)).unwrap();
        assert!((speed - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_eta() {
        assert_eq!(eta(1000, 100.0), Some(Duration::from_secs(10)));
        assert_eq!(eta(1000, 0.0), None);
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(Duration::from_secs(3725)), "01h02m05s");
        assert_eq!(format_eta(Duration::from_secs(0)), "00h00m00s");
        assert_eq!(format_eta(Duration::from_secs(100 * 3600)), "100h00m00s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(17_043_520), "17,043,520");
    }
}
