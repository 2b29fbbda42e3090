//! Thread-safe aggregate for parallel processing
//!
//! Contains GlobalTracker, the single shared tally that workers reduce into,
//! along with the merged per-worker statistics. Workers borrow it from the
//! processor's thread scope.

use std::sync::{Mutex, MutexGuard};

use crate::stats::ProcessingStats;
use crate::tally::{merge, Tally, Vocabulary};

/// Shared aggregate tally plus merged worker statistics
#[derive(Debug)]
pub struct GlobalTracker {
    pub(crate) tally: Mutex<Tally>,
    pub(crate) processing_stats: Mutex<ProcessingStats>,
}

impl GlobalTracker {
    /// Start from a zero entry for every vocabulary word
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            tally: Mutex::new(Tally::zeroed(vocabulary)),
            processing_stats: Mutex::new(ProcessingStats::default()),
        }
    }

    /// Lock the aggregate tally with poison recovery
    fn lock_tally(&self) -> MutexGuard<'_, Tally> {
        match self.tally.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // Merges are plain additions; partial updates stay consistent
                tracing::warn!("worker thread panicked, recovering aggregate tally");
                poisoned.into_inner()
            }
        }
    }

    /// Lock processing stats with poison recovery
    fn lock_stats(&self) -> MutexGuard<'_, ProcessingStats> {
        match self.processing_stats.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("worker thread panicked, recovering processing stats");
                poisoned.into_inner()
            }
        }
    }

    /// Fold one partial tally into the aggregate.
    ///
    /// The lock is held only for the merge itself.
    pub fn merge_partial(&self, partial: &Tally) {
        let mut aggregate = self.lock_tally();
        merge(partial, &mut aggregate);
    }

    pub fn merge_worker_stats(&self, worker_stats: &ProcessingStats) {
        self.lock_stats().merge(worker_stats);
    }

    /// Consume the tracker once every worker has been joined
    pub fn into_parts(self) -> (Tally, ProcessingStats) {
        let tally = self
            .tally
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let stats = self
            .processing_stats
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (tally, stats)
    }
}
