//! Parallel map-reduce engine
//!
//! The corpus is split across a fixed pool of worker threads. Each worker
//! counts its files without touching shared state, then folds every partial
//! tally into one aggregate guarded by a single mutex.
//!
//! # Module Structure
//!
//! - `types`: Engine configuration and partition strategy
//! - `partition`: Assignment of corpus files to workers
//! - `tracker`: The shared aggregate tally and merged worker statistics
//! - `worker`: Worker thread body
//! - `processor`: Main ParallelProcessor orchestration

mod partition;
mod processor;
mod tracker;
mod types;
mod worker;

pub use partition::partition;
pub use processor::{run_parallel, ParallelProcessor};
pub use tracker::GlobalTracker;
pub use types::{ParallelConfig, PartitionStrategy};
