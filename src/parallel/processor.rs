//! Main parallel processor
//!
//! Spawns one thread per worker, waits for every one of them, and only then
//! reads the aggregate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

use crate::counter::Counter;
use crate::error::{Result, TallyError};
use crate::readers::{Corpus, SourceReader};
use crate::TallyRun;

use super::partition::partition;
use super::tracker::GlobalTracker;
use super::types::ParallelConfig;
use super::worker::{worker_thread, Worker};

/// Main parallel processor
#[derive(Debug, Clone)]
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    /// Fails with a configuration error before any work when the config is invalid
    pub fn new(config: ParallelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Count the corpus across the worker pool.
    ///
    /// Returns the first worker error, if any, and never a partial aggregate.
    pub fn process(
        &self,
        corpus: &Corpus,
        counter: &Counter,
        reader: &dyn SourceReader,
    ) -> Result<TallyRun> {
        let started = Instant::now();
        let num_workers = self.config.num_workers;
        let tracker = GlobalTracker::new(counter.vocabulary());
        let abort = AtomicBool::new(false);

        let assignments = partition(corpus.len(), num_workers, self.config.partition);
        debug!(
            workers = num_workers,
            files = corpus.len(),
            strategy = ?self.config.partition,
            "partitioned corpus"
        );

        let mut first_error: Option<TallyError> = None;

        // Scope exit is the barrier: no worker outlives this block
        let outcomes: Vec<(usize, thread::Result<Result<()>>)> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(num_workers);

            for (worker_id, indices) in assignments.into_iter().enumerate() {
                let worker = Worker {
                    worker_id,
                    files: indices
                        .iter()
                        .map(|&i| corpus.files()[i].as_str())
                        .collect(),
                    counter,
                    reader,
                    tracker: &tracker,
                    abort: &abort,
                };

                let spawned = thread::Builder::new()
                    .name(format!("wordtally-worker-{}", worker_id))
                    .spawn_scoped(scope, move || worker_thread(worker));

                match spawned {
                    Ok(handle) => handles.push((worker_id, handle)),
                    Err(source) => {
                        abort.store(true, Ordering::Relaxed);
                        first_error = Some(TallyError::Spawn { worker_id, source });
                        break;
                    }
                }
            }

            handles
                .into_iter()
                .map(|(worker_id, handle)| (worker_id, handle.join()))
                .collect()
        });

        for (worker_id, outcome) in outcomes {
            let result = outcome.unwrap_or_else(|_| Err(TallyError::WorkerPanicked { worker_id }));
            if let Err(e) = result {
                warn!(worker_id, error = %e, "worker failed");
                first_error.get_or_insert(e);
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let (tally, mut stats) = tracker.into_parts();
        stats.workers = num_workers;
        stats.processing_time = started.elapsed();

        Ok(TallyRun { tally, stats })
    }
}

/// Count `corpus` with `workers` threads using the default partition strategy
pub fn run_parallel(
    corpus: &Corpus,
    counter: &Counter,
    reader: &dyn SourceReader,
    workers: usize,
) -> Result<TallyRun> {
    ParallelProcessor::new(ParallelConfig::new(workers))?.process(corpus, counter, reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::PartitionStrategy;
    use crate::readers::MemoryReader;
    use crate::sequential::run_sequential;
    use crate::tally::Vocabulary;

    fn scenario() -> (MemoryReader, Counter) {
        let reader = MemoryReader::new()
            .with_file("one.txt", "The cat sat. A dog barked. Catnip!")
            .with_file("two.txt", "Dogs and cats.");
        let counter = Counter::new(Vocabulary::new(["cat", "dog"]).unwrap());
        (reader, counter)
    }

    #[test]
    fn test_zero_workers_is_configuration_error() {
        let (reader, counter) = scenario();
        let err = run_parallel(&reader.corpus(), &counter, &reader, 0).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_parallel_scenario() {
        let (reader, counter) = scenario();
        let run = run_parallel(&reader.corpus(), &counter, &reader, 2).unwrap();
        assert_eq!(run.tally.get("cat"), Some(3));
        assert_eq!(run.tally.get("dog"), Some(2));
        assert_eq!(run.stats.workers, 2);
    }

    #[test]
    fn test_more_workers_than_files_merges_each_file_once() {
        let (reader, counter) = scenario();
        let sequential = run_sequential(&reader.corpus(), &counter, &reader).unwrap();

        for strategy in [PartitionStrategy::Strided, PartitionStrategy::Block] {
            let processor =
                ParallelProcessor::new(ParallelConfig::new(8).with_partition(strategy)).unwrap();
            let run = processor.process(&reader.corpus(), &counter, &reader).unwrap();
            assert_eq!(run.tally, sequential.tally);
            assert_eq!(run.stats.merges, 2);
            assert_eq!(run.stats.files_processed, 2);
        }
    }

    #[test]
    fn test_single_worker_matches_sequential() {
        let (reader, counter) = scenario();
        let sequential = run_sequential(&reader.corpus(), &counter, &reader).unwrap();
        let parallel = run_parallel(&reader.corpus(), &counter, &reader, 1).unwrap();
        assert_eq!(parallel.tally, sequential.tally);
    }

    #[test]
    fn test_empty_corpus_returns_zeroed_tally() {
        let (reader, counter) = scenario();
        let run = run_parallel(&Corpus::new(Vec::<String>::new()), &counter, &reader, 3).unwrap();
        assert_eq!(run.tally.words().collect::<Vec<_>>(), vec!["cat", "dog"]);
        assert_eq!(run.tally.total(), 0);
        assert_eq!(run.stats.merges, 0);
    }

    #[test]
    fn test_read_error_aborts_run() {
        let (reader, counter) = scenario();
        let corpus = Corpus::new(["one.txt", "missing.txt", "two.txt"]);
        let err = run_parallel(&corpus, &counter, &reader, 2).unwrap_err();
        match err {
            TallyError::Io { path, .. } => assert_eq!(path.to_str(), Some("missing.txt")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    struct PanickingReader;

    impl SourceReader for PanickingReader {
        fn read_lowercase(&self, file: &str) -> Result<String> {
            if file == "boom" {
                panic!("reader exploded");
            }
            Ok("cat".to_string())
        }
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let counter = Counter::new(Vocabulary::new(["cat"]).unwrap());
        let corpus = Corpus::new(["fine", "boom"]);
        let processor = ParallelProcessor::new(
            ParallelConfig::new(2).with_partition(PartitionStrategy::Block),
        )
        .unwrap();

        let err = processor.process(&corpus, &counter, &PanickingReader).unwrap_err();
        assert!(matches!(err, TallyError::WorkerPanicked { worker_id: 1 }));
    }
}
