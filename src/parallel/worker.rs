//! Worker thread for parallel processing

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

use crate::counter::Counter;
use crate::error::Result;
use crate::platform::check_termination;
use crate::readers::SourceReader;
use crate::stats::{
    get_thread_stats, stats_add_file, stats_add_merge, stats_finish_processing, stats_start_timer,
};

use super::tracker::GlobalTracker;

/// Everything one worker needs; only `tracker` and `abort` are shared
pub(crate) struct Worker<'a> {
    pub worker_id: usize,
    pub files: Vec<&'a str>,
    pub counter: &'a Counter,
    pub reader: &'a dyn SourceReader,
    pub tracker: &'a GlobalTracker,
    pub abort: &'a AtomicBool,
}

/// Worker thread: count each assigned file, then merge its partial tally.
///
/// A failing worker raises `abort` so its siblings stop at their next file.
pub(crate) fn worker_thread(worker: Worker<'_>) -> Result<()> {
    stats_start_timer();
    debug!(worker_id = worker.worker_id, files = worker.files.len(), "worker started");

    let result = process_files(&worker);
    if result.is_err() {
        worker.abort.store(true, Ordering::Relaxed);
    }

    stats_finish_processing();
    worker.tracker.merge_worker_stats(&get_thread_stats());
    debug!(worker_id = worker.worker_id, ok = result.is_ok(), "worker finished");

    result
}

fn process_files(worker: &Worker<'_>) -> Result<()> {
    for file in &worker.files {
        if worker.abort.load(Ordering::Relaxed) {
            debug!(worker_id = worker.worker_id, "sibling failed, stopping early");
            return Ok(());
        }
        check_termination()?;

        // Map step runs without any lock held
        let content = worker.reader.read_lowercase(file)?;
        let partial = worker.counter.count(&content);
        stats_add_file(content.len(), partial.total());

        worker.tracker.merge_partial(&partial);
        stats_add_merge();
        trace!(
            worker_id = worker.worker_id,
            file = %file,
            matches = partial.total(),
            "merged partial tally"
        );
    }
    Ok(())
}
