use std::cell::RefCell;
use std::time::{Duration, Instant};

/// Statistics collected while counting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub bytes_read: usize,
    pub matches: u64,
    pub merges: usize,
    pub workers: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

// Each worker thread collects into its own copy; the engine merges them at the end
thread_local! {
    static THREAD_STATS: RefCell<ProcessingStats> = RefCell::new(ProcessingStats::default());
}

pub fn stats_add_file(bytes: usize, matches: u64) {
    THREAD_STATS.with(|stats| {
        let mut stats = stats.borrow_mut();
        stats.files_processed += 1;
        stats.bytes_read += bytes;
        stats.matches += matches;
    });
}

pub fn stats_add_merge() {
    THREAD_STATS.with(|stats| {
        stats.borrow_mut().merges += 1;
    });
}

/// Reset this thread's counters and start its timer
pub fn stats_start_timer() {
    THREAD_STATS.with(|stats| {
        *stats.borrow_mut() = ProcessingStats {
            start_time: Some(Instant::now()),
            ..Default::default()
        };
    });
}

pub fn stats_finish_processing() {
    THREAD_STATS.with(|stats| {
        let mut stats = stats.borrow_mut();
        if let Some(start) = stats.start_time {
            stats.processing_time = start.elapsed();
        }
    });
}

pub fn get_thread_stats() -> ProcessingStats {
    THREAD_STATS.with(|stats| stats.borrow().clone())
}

impl ProcessingStats {
    /// Fold a worker's counters into this one. Processing time is wall-clock
    /// and is set by the engine, not summed.
    pub fn merge(&mut self, worker: &ProcessingStats) {
        self.files_processed += worker.files_processed;
        self.bytes_read += worker.bytes_read;
        self.matches += worker.matches;
        self.merges += worker.merges;
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Files processed: {}, {} bytes, {} matches, {} merges",
            self.files_processed, self.bytes_read, self.matches, self.merges
        );

        if self.workers > 0 {
            output.push_str(&format!(", {} workers", self.workers));
        }

        // Millisecond precision is plenty for a batch run
        let rounded = Duration::from_millis(self.processing_time.as_millis() as u64);
        output.push_str(&format!(" in {}", humantime::format_duration(rounded)));

        let secs = self.processing_time.as_secs_f64();
        if secs > 0.0 && self.files_processed > 0 {
            output.push_str(&format!(" ({:.0} files/s)", self.files_processed as f64 / secs));
        }

        output
    }
}
