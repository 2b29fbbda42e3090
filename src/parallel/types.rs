//! Type definitions for parallel processing

use crate::error::{Result, TallyError};

/// How corpus files are assigned to workers
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// File `i` goes to worker `i % workers`
    #[default]
    Strided,
    /// Each worker gets one contiguous run of files
    Block,
}

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_workers: usize,
    pub partition: PartitionStrategy,
}

impl ParallelConfig {
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers,
            partition: PartitionStrategy::default(),
        }
    }

    pub fn with_partition(mut self, partition: PartitionStrategy) -> Self {
        self.partition = partition;
        self
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(TallyError::InvalidWorkerCount(self.num_workers));
        }
        Ok(())
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        let err = ParallelConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, TallyError::InvalidWorkerCount(0)));
    }

    #[test]
    fn test_default_uses_cpu_count() {
        let config = ParallelConfig::default();
        assert!(config.num_workers >= 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.partition, PartitionStrategy::Strided);
    }
}
