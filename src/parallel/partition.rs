//! Assignment of corpus files to workers

use super::types::PartitionStrategy;

/// Split `len` file indices across `workers` workers.
///
/// Always returns exactly `workers` lists; together they contain every index
/// in `0..len` exactly once. Workers beyond the corpus size get empty lists.
pub fn partition(len: usize, workers: usize, strategy: PartitionStrategy) -> Vec<Vec<usize>> {
    let mut assignments = vec![Vec::new(); workers];
    if workers == 0 {
        return assignments;
    }

    match strategy {
        PartitionStrategy::Strided => {
            for index in 0..len {
                assignments[index % workers].push(index);
            }
        }
        PartitionStrategy::Block => {
            // The first `len % workers` blocks take one extra file
            let base = len / workers;
            let extra = len % workers;
            let mut next = 0;
            for (worker, assignment) in assignments.iter_mut().enumerate() {
                let size = base + usize::from(worker < extra);
                assignment.extend(next..next + size);
                next += size;
            }
        }
    }

    assignments
}
