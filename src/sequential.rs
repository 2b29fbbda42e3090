//! Single-threaded engine, the baseline the parallel engine must match

use tracing::debug;

use crate::counter::Counter;
use crate::error::Result;
use crate::platform::check_termination;
use crate::readers::{Corpus, SourceReader};
use crate::stats::{
    get_thread_stats, stats_add_file, stats_add_merge, stats_finish_processing, stats_start_timer,
};
use crate::tally::{merge, Tally};
use crate::TallyRun;

/// Count every corpus file in order, folding each partial tally into one aggregate
pub fn run_sequential(
    corpus: &Corpus,
    counter: &Counter,
    reader: &dyn SourceReader,
) -> Result<TallyRun> {
    stats_start_timer();

    let mut aggregate = Tally::zeroed(counter.vocabulary());
    for file in corpus.files() {
        check_termination()?;

        let content = reader.read_lowercase(file)?;
        let partial = counter.count(&content);
        stats_add_file(content.len(), partial.total());

        merge(&partial, &mut aggregate);
        stats_add_merge();
        debug!(file = %file, matches = partial.total(), "counted file");
    }

    stats_finish_processing();
    let mut stats = get_thread_stats();
    stats.workers = 1;

    Ok(TallyRun {
        tally: aggregate,
        stats,
    })
}
