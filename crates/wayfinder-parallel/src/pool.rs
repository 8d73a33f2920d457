// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Bounded Worker Pool
//!
//! A fixed set of named worker threads, spawned inside a `std::thread::scope`,
//! draining one bounded multi-producer/multi-consumer job queue. Jobs may submit
//! further jobs through the `Submitter` they are handed.
//!
//! - Submission never blocks: a full queue hands the job back to the caller,
//!   which decides what to do with it.
//! - A job that panics is logged and the worker moves on to the next one.
//! - Shutdown closes a dedicated stop channel; every worker leaves its loop
//!   at the next wake-up, and jobs still queued are dropped unrun.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, Scope, ScopedJoinHandle};

/// Raised when the pool could not start a single worker.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to spawn any worker thread")]
    Spawn(#[source] std::io::Error),
}

/// A job the queue did not accept, handed back to the submitter.
#[derive(Debug)]
pub enum Rejected<J> {
    /// The queue is at capacity.
    Full(J),
    /// The pool has shut down.
    Closed(J),
}

impl<J> Rejected<J> {
    #[inline]
    pub fn into_inner(self) -> J {
        match self {
            Rejected::Full(job) | Rejected::Closed(job) => job,
        }
    }
}

/// Sizing of a `WorkerPool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub num_workers: usize,
    pub queue_capacity: usize,
    pub stack_size: Option<usize>,
}

/// Non-blocking entry point into the job queue.
#[derive(Debug)]
pub struct Submitter<J> {
    jobs: Sender<J>,
}

impl<J> Clone for Submitter<J> {
    fn clone(&self) -> Self {
        Self {
            jobs: self.jobs.clone(),
        }
    }
}

impl<J> Submitter<J> {
    #[inline]
    pub fn try_submit(&self, job: J) -> Result<(), Rejected<J>> {
        self.jobs.try_send(job).map_err(|err| match err {
            TrySendError::Full(job) => Rejected::Full(job),
            TrySendError::Disconnected(job) => Rejected::Closed(job),
        })
    }

    /// Returns the number of jobs waiting in the queue.
    #[inline]
    pub fn queued(&self) -> usize {
        self.jobs.len()
    }
}

/// Creates a queue that no worker drains, for running jobs on the calling thread.
#[inline]
pub fn local_queue<J>(capacity: usize) -> (Submitter<J>, Receiver<J>) {
    let (jobs, queue) = crossbeam_channel::bounded(capacity.max(1));
    (Submitter { jobs }, queue)
}

struct Worker<J, F> {
    index: usize,
    jobs: Receiver<J>,
    stop: Receiver<()>,
    submitter: Submitter<J>,
    handler: Arc<F>,
}

impl<J, F> Worker<J, F>
where
    F: Fn(J, &Submitter<J>),
{
    fn run(self) {
        loop {
            crossbeam_channel::select! {
                recv(self.jobs) -> job => match job {
                    Ok(job) => self.execute(job),
                    Err(_) => break,
                },
                recv(self.stop) -> _ => break,
            }
        }
    }

    #[inline]
    fn execute(&self, job: J) {
        let handler = &self.handler;
        let submitter = &self.submitter;
        if panic::catch_unwind(AssertUnwindSafe(|| handler(job, submitter))).is_err() {
            log::warn!("worker {} recovered from a panicking job", self.index);
        }
    }
}

/// A running pool of scoped worker threads.
pub struct WorkerPool<'scope, J> {
    submitter: Submitter<J>,
    stop: Option<Sender<()>>,
    workers: Vec<ScopedJoinHandle<'scope, ()>>,
}

impl<'scope, J> WorkerPool<'scope, J>
where
    J: Send + 'scope,
{
    /// Spawns up to `options.num_workers` workers running `handler` for every job.
    ///
    /// A worker that fails to spawn is logged and the pool continues with the
    /// ones that did; only a pool without any worker is an error.
    pub fn spawn<'env, F>(
        scope: &'scope Scope<'scope, 'env>,
        options: PoolOptions,
        handler: F,
    ) -> Result<Self, PoolError>
    where
        F: Fn(J, &Submitter<J>) + Send + Sync + 'scope,
    {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<J>(options.queue_capacity.max(1));
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let handler = Arc::new(handler);

        let mut workers = Vec::with_capacity(options.num_workers);
        let mut last_error = None;

        for index in 0..options.num_workers {
            let mut builder = thread::Builder::new().name(format!("wayfinder-worker-{}", index));
            if let Some(bytes) = options.stack_size {
                builder = builder.stack_size(bytes);
            }

            let worker = Worker {
                index,
                jobs: job_rx.clone(),
                stop: stop_rx.clone(),
                submitter: Submitter {
                    jobs: job_tx.clone(),
                },
                handler: Arc::clone(&handler),
            };

            match builder.spawn_scoped(scope, move || worker.run()) {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    log::warn!("failed to spawn worker {}: {}", index, err);
                    last_error = Some(err);
                    break;
                }
            }
        }

        if workers.is_empty() {
            let err = last_error.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "pool sized to zero workers")
            });
            return Err(PoolError::Spawn(err));
        }

        Ok(Self {
            submitter: Submitter { jobs: job_tx },
            stop: Some(stop_tx),
            workers,
        })
    }

    #[inline]
    pub fn submitter(&self) -> &Submitter<J> {
        &self.submitter
    }

    #[inline]
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Stops and joins every worker. Returns how many of them had panicked.
    pub fn shutdown(mut self) -> usize {
        self.stop.take();
        let mut panicked = 0;
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("<unnamed>").to_owned();
            if handle.join().is_err() {
                log::warn!("worker thread '{}' panicked during shutdown", name);
                panicked += 1;
            }
        }
        panicked
    }
}

impl<J> Drop for WorkerPool<'_, J> {
    fn drop(&mut self) {
        // Workers still attached are joined by the enclosing scope.
        self.stop.take();
    }
}

impl<J> std::fmt::Debug for WorkerPool<'_, J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .field("queued", &self.submitter.queued())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{PoolOptions, Rejected, WorkerPool, local_queue};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Barrier, mpsc};
    use std::thread;
    use std::time::Duration;

    fn options(num_workers: usize, queue_capacity: usize) -> PoolOptions {
        PoolOptions {
            num_workers,
            queue_capacity,
            stack_size: None,
        }
    }

    #[test]
    fn test_runs_submitted_and_follow_up_jobs() {
        let sum = AtomicU64::new(0);
        let (done_tx, done_rx) = mpsc::channel();

        thread::scope(|scope| {
            let pool = WorkerPool::spawn(scope, options(3, 64), |n: u64, submitter| {
                sum.fetch_add(n, Ordering::SeqCst);
                if n > 1 {
                    // Queue is large enough for every follow-up job.
                    assert!(submitter.try_submit(n - 1).is_ok());
                } else {
                    done_tx.send(()).unwrap();
                }
            })
            .unwrap();

            assert_eq!(pool.num_workers(), 3);
            pool.submitter().try_submit(10).unwrap();
            done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
            assert_eq!(pool.shutdown(), 0);
        });

        assert_eq!(sum.load(Ordering::SeqCst), 55);
    }

    #[test]
    fn test_full_queue_hands_job_back() {
        let barrier = Barrier::new(2);

        thread::scope(|scope| {
            let pool = WorkerPool::spawn(scope, options(1, 1), |wait: bool, _| {
                if wait {
                    barrier.wait();
                }
            })
            .unwrap();

            let submitter = pool.submitter();
            submitter.try_submit(true).unwrap();
            // Wait until the worker has taken the blocking job off the queue.
            while submitter.queued() > 0 {
                thread::yield_now();
            }
            submitter.try_submit(false).unwrap();
            match submitter.try_submit(false) {
                Err(Rejected::Full(job)) => assert!(!job),
                other => panic!("expected a full queue, got {:?}", other),
            }

            barrier.wait();
            pool.shutdown();
        });
    }

    #[test]
    fn test_panicking_job_does_not_kill_worker() {
        let (done_tx, done_rx) = mpsc::channel();

        thread::scope(|scope| {
            let pool = WorkerPool::spawn(scope, options(1, 8), |explode: bool, _| {
                if explode {
                    panic!("job exploded");
                }
                done_tx.send(()).unwrap();
            })
            .unwrap();

            pool.submitter().try_submit(true).unwrap();
            pool.submitter().try_submit(false).unwrap();
            done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
            assert_eq!(pool.shutdown(), 0);
        });
    }

    #[test]
    fn test_dropping_pool_stops_workers() {
        thread::scope(|scope| {
            let pool = WorkerPool::spawn(scope, options(2, 4), |_: (), _| {}).unwrap();
            drop(pool);
            // Leaving the scope joins the workers; this would hang if they
            // were still waiting for jobs.
        });
    }

    #[test]
    fn test_submitting_after_shutdown_is_rejected() {
        thread::scope(|scope| {
            let pool = WorkerPool::spawn(scope, options(1, 4), |_: u8, _| {}).unwrap();
            let submitter = pool.submitter().clone();
            pool.shutdown();
            assert!(matches!(
                submitter.try_submit(1),
                Err(Rejected::Closed(1))
            ));
        });
    }

    #[test]
    fn test_local_queue_is_drained_by_caller() {
        let (submitter, queue) = local_queue::<u32>(2);
        submitter.try_submit(1).unwrap();
        submitter.try_submit(2).unwrap();
        assert!(matches!(submitter.try_submit(3), Err(Rejected::Full(3))));
        assert_eq!(queue.try_iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
