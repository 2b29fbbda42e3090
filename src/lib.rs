// Core library for wordtally: map-reduce word counting over a text corpus

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

pub mod cli;
pub mod config;
pub mod config_file;
pub mod counter;
pub mod decompression;
pub mod error;
pub mod logging;
pub mod parallel;
pub mod platform;
pub mod readers;
pub mod report;
pub mod sequential;
pub mod stats;
pub mod tally;
pub mod verify;

pub use config::TallyConfig;
pub use counter::Counter;
pub use error::{Result, TallyError};
pub use parallel::{run_parallel, ParallelConfig, ParallelProcessor, PartitionStrategy};
pub use readers::{Corpus, FsReader, MemoryReader, SourceReader};
pub use sequential::run_sequential;
pub use stats::ProcessingStats;
pub use tally::{merge, Tally, Vocabulary};
pub use verify::{verify, Mismatch, VerificationFailure};

/// Aggregate tally of one engine run plus the statistics gathered on the way
#[derive(Debug, Clone)]
pub struct TallyRun {
    pub tally: Tally,
    pub stats: ProcessingStats,
}

/// Which engine produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sequential,
    Parallel,
}

/// Everything the reporting step needs about a finished run
#[derive(Debug)]
pub struct TallyOutcome {
    pub run: TallyRun,
    pub mode: Mode,
    pub workers: usize,
    pub elapsed: Duration,
    /// `None` when no expected tally was configured
    pub verification: Option<std::result::Result<(), VerificationFailure>>,
}

impl TallyOutcome {
    pub fn verification_failed(&self) -> bool {
        matches!(self.verification, Some(Err(_)))
    }
}

/// Run the configured engine over the configured corpus.
///
/// Configuration errors surface before any file is read. A verification
/// mismatch is not an error here; it is carried in the outcome.
pub fn run_tally(config: &TallyConfig, reader: &dyn SourceReader) -> Result<TallyOutcome> {
    let counter = Counter::new(config.vocabulary()?);
    let corpus = config.corpus();

    let started = Instant::now();
    let (mode, run) = if config.should_use_parallel() {
        let processor = ParallelProcessor::new(config.parallel_config())?;
        info!(
            workers = processor.config().num_workers,
            files = corpus.len(),
            words = counter.vocabulary().len(),
            "starting parallel run"
        );
        (Mode::Parallel, processor.process(&corpus, &counter, reader)?)
    } else {
        info!(
            files = corpus.len(),
            words = counter.vocabulary().len(),
            "starting sequential run"
        );
        (Mode::Sequential, run_sequential(&corpus, &counter, reader)?)
    };
    let elapsed = started.elapsed();

    let verification = config
        .verification
        .expected
        .as_ref()
        .map(|expected| verify(&run.tally, expected));

    Ok(TallyOutcome {
        workers: run.stats.workers,
        run,
        mode,
        elapsed,
        verification,
    })
}
