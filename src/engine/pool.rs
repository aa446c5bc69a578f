//! Work-stealing trial executor.
//!
//! Implements Heijunka (load leveling) for independent trials. Every trial
//! index is pushed onto a global injector; workers drain their local FIFO,
//! then the injector, then steal from each other. Results are re-ordered by
//! trial index before they are returned, so the output never depends on
//! scheduling.
//!
//! Cancellation is coarse: workers look at the stop flag between trials and
//! never interrupt one in progress.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crossbeam_deque::{Injector, Steal, Stealer, Worker};

/// Outcome of a pool run.
#[derive(Debug)]
pub enum PoolOutcome<R> {
    /// Every task ran; results are in task order.
    Completed(Vec<R>),
    /// The stop flag was raised before every task ran.
    Cancelled {
        /// Tasks that finished.
        completed: usize,
    },
}

/// Work-stealing executor over task indices `0..n`.
#[derive(Debug, Clone, Copy)]
pub struct TrialPool {
    /// Number of worker threads.
    num_workers: usize,
}

impl Default for TrialPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialPool {
    /// Create with one worker per available CPU.
    #[must_use]
    pub fn new() -> Self {
        Self {
            num_workers: std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(4),
        }
    }

    /// Create with a specific worker count; `0` means available parallelism.
    #[must_use]
    pub fn with_workers(num_workers: usize) -> Self {
        if num_workers == 0 {
            Self::new()
        } else {
            Self { num_workers }
        }
    }

    /// Get number of workers.
    #[must_use]
    pub const fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Run `task(i)` for every `i` in `0..n`, stopping early if `stop` is raised.
    pub fn execute<F, R>(&self, n: usize, stop: &AtomicBool, task: F) -> PoolOutcome<R>
    where
        F: Fn(usize) -> R + Sync,
        R: Send,
    {
        let injector: Injector<usize> = Injector::new();
        for index in 0..n {
            injector.push(index);
        }

        let workers: Vec<Worker<usize>> =
            (0..self.num_workers).map(|_| Worker::new_fifo()).collect();
        let stealers: Vec<Stealer<usize>> = workers.iter().map(Worker::stealer).collect();

        let results: Mutex<Vec<(usize, R)>> = Mutex::new(Vec::with_capacity(n));

        std::thread::scope(|s| {
            for (worker_id, worker) in workers.into_iter().enumerate() {
                let injector = &injector;
                let stealers = &stealers;
                let results = &results;
                let task = &task;

                s.spawn(move || {
                    let mut local = Vec::new();
                    while !stop.load(Ordering::Relaxed) {
                        let Some(index) = next_task(worker_id, &worker, injector, stealers)
                        else {
                            break;
                        };
                        local.push((index, task(index)));
                    }
                    tracing::debug!(worker_id, trials = local.len(), "worker finished");
                    if let Ok(mut guard) = results.lock() {
                        guard.extend(local);
                    }
                });
            }
        });

        let mut indexed = results.into_inner().unwrap_or_default();
        if indexed.len() < n {
            return PoolOutcome::Cancelled {
                completed: indexed.len(),
            };
        }
        indexed.sort_by_key(|(idx, _)| *idx);
        PoolOutcome::Completed(indexed.into_iter().map(|(_, r)| r).collect())
    }
}

/// Local queue first, then the global injector, then round-robin theft.
fn next_task(
    worker_id: usize,
    worker: &Worker<usize>,
    injector: &Injector<usize>,
    stealers: &[Stealer<usize>],
) -> Option<usize> {
    if let Some(index) = worker.pop() {
        return Some(index);
    }
    loop {
        match injector.steal_batch_and_pop(worker) {
            Steal::Success(index) => return Some(index),
            Steal::Empty => break,
            Steal::Retry => {}
        }
    }
    for i in 0..stealers.len() {
        let victim = (worker_id + i + 1) % stealers.len();
        loop {
            match stealers[victim].steal() {
                Steal::Success(index) => return Some(index),
                Steal::Empty => break,
                Steal::Retry => {}
            }
        }
    }
    None
}
