//! Resumable batch writer - drive the mapper across the universe into
//! numbered output files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use super::checkpoint::{CheckpointRequest, Checkpointer, NoopCheckpointer};
use super::clock::{Clock, SystemClock};
use super::mapper::ComboMapper;
use super::progress::{self, ProgressReporter, ProgressThrottle, SilentReporter};
use super::state::CursorState;
use super::Alphabet;
use crate::error::{Result, WordlistError};
use crate::types::{FileReport, GeneratorConfig, ProgressReport, ResumeMode, RunSummary, StartInfo};

/// Single-threaded generator writing every combination, in order, into
/// fixed-size files.
///
/// The cursor is saved after each file is flushed and closed. A restart
/// rewrites the first unfinished file from its first entry.
pub struct BatchWriter {
    config: GeneratorConfig,
    mapper: ComboMapper,
    state: CursorState,
    checkpointer: Box<dyn Checkpointer>,
    reporter: Box<dyn ProgressReporter>,
    clock: Box<dyn Clock>,
}

impl BatchWriter {
    /// Create a writer that checkpoints nothing and reports nothing
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let alphabet = Alphabet::new(&config.alphabet)?;
        let mapper = ComboMapper::new(alphabet, config.max_length)?;
        let state = CursorState::new(config.state_path());

        Ok(Self {
            config,
            mapper,
            state,
            checkpointer: Box::new(NoopCheckpointer),
            reporter: Box::new(SilentReporter),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_checkpointer(mut self, checkpointer: impl Checkpointer + 'static) -> Self {
        self.checkpointer = Box::new(checkpointer);
        self
    }

    pub fn with_reporter(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn mapper(&self) -> &ComboMapper {
        &self.mapper
    }

    /// Where the next run would start.
    ///
    /// The index is aligned down to the first entry of its file so an
    /// unfinished file is always rewritten whole, never appended to.
    pub fn resume_point(&self) -> (ResumeMode, u64) {
        let total = self.mapper.total();
        match self.state.load(total) {
            Some(last_written) => {
                let next = last_written + 1;
                let aligned = if next == total {
                    next
                } else {
                    next - next % self.config.entries_per_file
                };
                if aligned != next {
                    tracing::warn!(
                        last_written,
                        restart_at = aligned,
                        "Cursor is not at a file boundary, redoing the whole file"
                    );
                }
                (ResumeMode::Resumed { last_written }, aligned)
            }
            None => (ResumeMode::Fresh, 0),
        }
    }

    /// Generate everything from the resume point to the end of the universe
    pub fn run(&mut self) -> Result<RunSummary> {
        let total = self.mapper.total();
        let per_file = self.config.entries_per_file;
        let (mode, start_index) = self.resume_point();
        let mut next = start_index;
        let mut files_completed = next.div_ceil(per_file);

        tracing::info!(?mode, next_index = next, total, files_completed, "Starting generation");
        self.reporter.on_start(&StartInfo {
            mode,
            next_index: next,
            total,
            files_completed,
        });

        let started_at = Utc::now();
        let start = self.clock.now();
        let mut throttle = ProgressThrottle::new(self.config.progress_interval, start);

        while next < total {
            let file_number = next / per_file + 1;
            let quota = per_file.min(total - next);
            let path = self.config.output_path(file_number);

            self.write_file(&path, file_number, next, quota, &mut throttle)?;
            next += quota;
            files_completed += 1;

            let report = FileReport {
                file_number,
                path,
                entries: quota,
                files_completed,
                last_index: next - 1,
            };
            self.persist(&report);
            self.reporter.on_file_complete(&report);

            if files_completed % self.config.checkpoint_interval == 0 {
                self.checkpoint(files_completed);
            }
        }

        if files_completed % self.config.checkpoint_interval != 0 {
            self.checkpoint(files_completed);
        }

        let summary = RunSummary {
            total,
            generated: total - start_index,
            resumed_from: start_index,
            files_completed,
            elapsed: self.clock.now().saturating_duration_since(start),
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            generated = summary.generated,
            files = summary.files_completed,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "Generation complete"
        );
        self.reporter.on_finish(&summary);

        Ok(summary)
    }

    /// Write `quota` entries starting at `first` into a freshly truncated file
    fn write_file(
        &mut self,
        path: &Path,
        file_number: u64,
        first: u64,
        quota: u64,
        throttle: &mut ProgressThrottle,
    ) -> Result<()> {
        let file = File::create(path).map_err(|e| WordlistError::output(e.to_string(), path))?;
        let mut out = BufWriter::new(file);
        let total = self.mapper.total();
        let end = first + quota;
        let mut position = first;

        while position < end {
            let batch_end = end.min(position.saturating_add(self.config.batch_size));
            for combo in self.mapper.combos(position..batch_end)? {
                writeln!(out, "{}", combo).map_err(|e| WordlistError::output(e.to_string(), path))?;
            }
            let count = batch_end - position;
            position = batch_end;

            if let Some(speed) = throttle.record(count, self.clock.now()) {
                self.reporter.on_progress(&ProgressReport {
                    file_number,
                    position,
                    total,
                    speed,
                    eta: progress::eta(total - position, speed),
                });
            }
        }

        let file = out
            .into_inner()
            .map_err(|e| WordlistError::output(e.error().to_string(), path))?;
        file.sync_all()
            .map_err(|e| WordlistError::output(e.to_string(), path))?;
        Ok(())
    }

    fn persist(&mut self, report: &FileReport) {
        match self.state.save(report.last_index) {
            Ok(()) => {
                tracing::info!(
                    file = %report.path.display(),
                    last_index = report.last_index,
                    "File complete, cursor saved"
                );
            }
            Err(e) => {
                tracing::error!(
                    file = %report.path.display(),
                    last_index = report.last_index,
                    error = %e,
                    "Failed to save cursor; a restart will regenerate this file"
                );
                self.reporter.on_persist_failed(report, &e);
            }
        }
    }

    fn checkpoint(&mut self, files_completed: u64) {
        let request = CheckpointRequest {
            files_completed,
            latest_file: self.config.file_name(files_completed),
        };
        let outcome = self.checkpointer.checkpoint(&request);
        match &outcome {
            Ok(()) => tracing::info!(files_completed, "Checkpoint pushed"),
            Err(e) => tracing::warn!(files_completed, error = %e, "Checkpoint failed, continuing"),
        }
        self.reporter.on_checkpoint(&request, &outcome);
    }
}
