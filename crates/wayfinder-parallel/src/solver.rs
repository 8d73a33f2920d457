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

//! Concurrent hybrid depth/breadth-first solver.
//!
//! Every task expands one node. Before doing anything it counts a try and
//! gives up if the result latch is already settled or the visited set has
//! seen its state; a goal is published to the latch, first writer wins.
//! Otherwise each child either goes to the pool's queue (probability `f`, the
//! depth-breadth factor) or is continued on the current worker. Inline
//! continuations live on a per-task stack, so arbitrarily deep chains of them
//! never grow the thread's call stack.
//!
//! Exhaustion is detected without a coordinator: every task is registered in
//! an `InFlightCounter` before it becomes visible and completed after it has
//! run, and the completion that brings the counter to zero publishes
//! "exhausted". The caller only blocks on the latch.
//!
//! With `SaturationPolicy::Discard` a child that finds the queue full is
//! dropped and completed on the spot. That keeps memory bounded and the search
//! live, but a goal reachable only through dropped children can be missed;
//! `SaturationPolicy::RunInline` continues such children on the current worker
//! instead and keeps the search complete.

use crate::{
    coin::{CoinSource, SeededCoin},
    config::{ConcurrentConfig, SaturationPolicy},
    counter::InFlightCounter,
    pool::{PoolOptions, Rejected, Submitter, WorkerPool, local_queue},
};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::{Duration, Instant};
use wayfinder_model::{path::PathNode, space::ConcurrentSearchSpace, visited::VisitedSet};
use wayfinder_search::{
    interrupt::{InterruptHandle, Interruptible},
    latch::ValueLatch,
    monitor::search_monitor::SearchMonitor,
    result::SolverOutcome,
    solver::Solver,
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

type Node<S, M> = Arc<PathNode<S, M>>;

/// What the latch of a run settles on.
enum Verdict<S, M> {
    Found(Node<S, M>),
    Exhausted,
    Interrupted,
}

impl<S, M> Clone for Verdict<S, M> {
    fn clone(&self) -> Self {
        match self {
            Verdict::Found(node) => Verdict::Found(Arc::clone(node)),
            Verdict::Exhausted => Verdict::Exhausted,
            Verdict::Interrupted => Verdict::Interrupted,
        }
    }
}

/// A multi-threaded solver mixing depth-first continuation with
/// breadth-first fan-out across a bounded worker pool.
///
/// The returned path is whichever goal was published first; it is a
/// solution, not necessarily the shortest one.
pub struct ConcurrentSolver {
    config: ConcurrentConfig,
    coin: Arc<dyn CoinSource>,
    interrupt: InterruptHandle,
}

impl Default for ConcurrentSolver {
    fn default() -> Self {
        Self::new(ConcurrentConfig::default())
    }
}

impl ConcurrentSolver {
    /// Creates a solver drawing its depth/breadth decisions from a
    /// `SeededCoin` with the default seed.
    #[inline]
    pub fn new(config: ConcurrentConfig) -> Self {
        Self {
            config,
            coin: Arc::new(SeededCoin::default()),
            interrupt: InterruptHandle::new(),
        }
    }

    /// Replaces the source of the depth/breadth draws.
    #[inline]
    pub fn with_coin<C>(mut self, coin: C) -> Self
    where
        C: CoinSource + 'static,
    {
        self.coin = Arc::new(coin);
        self
    }

    #[inline]
    pub fn config(&self) -> &ConcurrentConfig {
        &self.config
    }

    /// Returns a handle that interrupts the solve currently running on this solver.
    #[inline]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Runs the search on `space` and blocks until it has a verdict.
    pub fn solve<P>(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move>
    where
        P: ConcurrentSearchSpace,
        P::State: 'static,
        P::Move: 'static,
    {
        let start_time = Instant::now();
        let initial = space.initial_state();
        log::debug!("concurrent search started: {}", self.config);
        monitor.on_enter_search(&initial);

        let latch: Arc<ValueLatch<Verdict<P::State, P::Move>>> = Arc::new(ValueLatch::new());
        let target: Weak<dyn Interruptible> = Arc::downgrade(&latch) as _;
        let _attached = self.interrupt.attach(target);

        let session = ConcurrentSearchSession {
            space,
            config: &self.config,
            coin: &*self.coin,
            latch: &latch,
            visited: VisitedSet::new(),
            in_flight: InFlightCounter::new(),
            monitor: Mutex::new(monitor),
            counters: Counters::default(),
        };

        let (verdict, used_threads) = session.run(PathNode::root(initial.clone()));
        let statistics = session.statistics(used_threads, start_time.elapsed());
        let outcome = match verdict {
            Verdict::Found(node) => SolverOutcome::solved(node.to_solution(), statistics),
            Verdict::Exhausted => SolverOutcome::no_solution(statistics),
            Verdict::Interrupted => SolverOutcome::interrupted(statistics),
        };

        log::debug!(
            "concurrent search finished: {} ({} submitted, {} inlined, {} discarded)",
            outcome,
            outcome.statistics.tasks_submitted,
            outcome.statistics.tasks_inlined,
            outcome.statistics.tasks_discarded
        );
        session
            .into_monitor()
            .on_exit_search(&outcome.final_report(&initial));
        outcome
    }
}

impl<P> Solver<P> for ConcurrentSolver
where
    P: ConcurrentSearchSpace,
    P::State: 'static,
    P::Move: 'static,
{
    fn name(&self) -> &str {
        "ConcurrentSolver"
    }

    fn solve(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move> {
        ConcurrentSolver::solve(self, space, monitor)
    }
}

impl std::fmt::Debug for ConcurrentSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentSolver")
            .field("config", &self.config)
            .field("interrupt", &self.interrupt)
            .finish()
    }
}

#[derive(Debug, Default)]
struct Counters {
    tries: AtomicU64,
    states_visited: AtomicU64,
    max_depth: AtomicUsize,
    tasks_submitted: AtomicU64,
    tasks_inlined: AtomicU64,
    tasks_discarded: AtomicU64,
}

/// State shared by every task of a single run.
struct ConcurrentSearchSession<'a, 'm, P>
where
    P: ConcurrentSearchSpace,
{
    space: &'a P,
    config: &'a ConcurrentConfig,
    coin: &'a dyn CoinSource,
    latch: &'a ValueLatch<Verdict<P::State, P::Move>>,
    visited: VisitedSet<P::State>,
    in_flight: InFlightCounter,
    monitor: Mutex<&'m mut dyn SearchMonitor<P::State, P::Move>>,
    counters: Counters,
}

type Inline<S, M> = SmallVec<[Node<S, M>; 32]>;

impl<'a, 'm, P> ConcurrentSearchSession<'a, 'm, P>
where
    P: ConcurrentSearchSpace,
{
    /// Runs the search from `root` until the latch settles.
    /// Returns the verdict and the number of threads that searched.
    fn run(&self, root: Node<P::State, P::Move>) -> (Verdict<P::State, P::Move>, usize) {
        let options = PoolOptions {
            num_workers: self.config.num_workers(),
            queue_capacity: self.config.queue_capacity(),
            stack_size: self.config.worker_stack_size(),
        };

        self.in_flight.register();
        std::thread::scope(|scope| {
            let spawned = WorkerPool::spawn(
                scope,
                options,
                |job: Node<P::State, P::Move>, submitter: &Submitter<Node<P::State, P::Move>>| {
                    self.run_task(job, submitter)
                },
            );

            match spawned {
                Ok(pool) => {
                    let used_threads = pool.num_workers();
                    if let Err(rejected) = pool.submitter().try_submit(root) {
                        self.run_task(rejected.into_inner(), pool.submitter());
                    }
                    let verdict = self.await_verdict();
                    pool.shutdown();
                    (verdict, used_threads)
                }
                Err(err) => {
                    log::warn!("{}; searching on the calling thread", err);
                    (self.run_on_caller(root), 1)
                }
            }
        })
    }

    /// Drains the search on the calling thread when no worker could be started.
    fn run_on_caller(&self, root: Node<P::State, P::Move>) -> Verdict<P::State, P::Move> {
        let (submitter, queue) = local_queue(self.config.queue_capacity());
        let mut next = Some(root);
        while let Some(job) = next.take().or_else(|| queue.try_recv().ok()) {
            if self.latch.is_interrupted() {
                break;
            }
            self.run_task(job, &submitter);
        }
        self.await_verdict()
    }

    fn await_verdict(&self) -> Verdict<P::State, P::Move> {
        match self.latch.get_value() {
            Ok(verdict) => verdict,
            Err(_) => {
                // First writer wins, so a result that raced in is kept, even
                // one whose writer has not finished storing it.
                self.latch.set_value(Verdict::Interrupted);
                self.latch.wait_published().unwrap_or(Verdict::Interrupted)
            }
        }
    }

    /// Runs one task: `root` and every child continued inline from it.
    fn run_task(
        &self,
        root: Node<P::State, P::Move>,
        submitter: &Submitter<Node<P::State, P::Move>>,
    ) {
        let mut frame = TaskFrame {
            session: self,
            outstanding: 1,
        };
        let mut stack: Inline<P::State, P::Move> = SmallVec::new();
        stack.push(root);

        while let Some(node) = stack.pop() {
            self.expand(node, &mut stack, &mut frame, submitter);
            frame.finish_one();
        }
    }

    fn expand(
        &self,
        node: Node<P::State, P::Move>,
        stack: &mut Inline<P::State, P::Move>,
        frame: &mut TaskFrame<'_, 'a, 'm, P>,
        submitter: &Submitter<Node<P::State, P::Move>>,
    ) {
        let tries = self.counters.tries.fetch_add(1, Ordering::Relaxed) + 1;
        if self.latch.is_set() || self.space.already_seen(node.state(), &self.visited) {
            return;
        }

        self.counters.states_visited.fetch_add(1, Ordering::Relaxed);
        self.counters
            .max_depth
            .fetch_max(node.depth(), Ordering::Relaxed);
        self.refresh(node.state(), tries);

        if self.space.is_goal(node.state()) {
            if self.latch.set_value(Verdict::Found(node)) {
                log::debug!("goal published after {} tries", tries);
            }
            return;
        }

        let factor = self.config.depth_breadth_factor();
        let mut inline: SmallVec<[Node<P::State, P::Move>; 8]> = SmallVec::new();

        for mv in self.space.legal_moves(node.state()) {
            let state = self.space.apply_move(node.state(), &mv);
            let child = PathNode::child(&node, mv, state);
            self.in_flight.register();

            if !factor.submits(|| self.coin.draw()) {
                frame.adopt();
                inline.push(child);
                continue;
            }

            match submitter.try_submit(child) {
                Ok(()) => {
                    self.counters.tasks_submitted.fetch_add(1, Ordering::Relaxed);
                }
                Err(Rejected::Full(child)) => match self.config.saturation_policy() {
                    SaturationPolicy::Discard => {
                        self.counters.tasks_discarded.fetch_add(1, Ordering::Relaxed);
                        self.finish_tasks(1);
                    }
                    SaturationPolicy::RunInline => {
                        frame.adopt();
                        inline.push(child);
                    }
                },
                Err(Rejected::Closed(_)) => self.finish_tasks(1),
            }
        }

        self.counters
            .tasks_inlined
            .fetch_add(inline.len() as u64, Ordering::Relaxed);
        // Reversed, so the first legal move is continued first.
        stack.extend(inline.into_iter().rev());
    }

    #[inline]
    fn refresh(&self, state: &P::State, tries: u64) {
        if tries & self.config.refresh_mask() != 0 {
            return;
        }
        // A busy monitor skips the refresh rather than stalling a worker.
        if let Ok(mut monitor) = self.monitor.try_lock() {
            monitor.on_refresh(state, tries);
        }
    }

    #[inline]
    fn finish_tasks(&self, n: usize) {
        if self.in_flight.complete(n) && self.latch.set_value(Verdict::Exhausted) {
            log::debug!("search space exhausted");
        }
    }

    fn statistics(&self, used_threads: usize, elapsed: Duration) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .tries(self.counters.tries.load(Ordering::Relaxed))
            .states_visited(self.counters.states_visited.load(Ordering::Relaxed))
            .max_depth(self.counters.max_depth.load(Ordering::Relaxed))
            .used_threads(used_threads)
            .tasks_submitted(self.counters.tasks_submitted.load(Ordering::Relaxed))
            .tasks_inlined(self.counters.tasks_inlined.load(Ordering::Relaxed))
            .tasks_discarded(self.counters.tasks_discarded.load(Ordering::Relaxed))
            .solve_duration(elapsed)
            .build()
    }

    fn into_monitor(self) -> &'m mut dyn SearchMonitor<P::State, P::Move> {
        self.monitor
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Tasks a running task has registered and still has to complete.
///
/// Whatever is outstanding when the frame is dropped, including by a
/// panicking puzzle, is completed then, so the in-flight count stays exact.
struct TaskFrame<'s, 'a, 'm, P>
where
    P: ConcurrentSearchSpace,
{
    session: &'s ConcurrentSearchSession<'a, 'm, P>,
    outstanding: usize,
}

impl<P> TaskFrame<'_, '_, '_, P>
where
    P: ConcurrentSearchSpace,
{
    #[inline(always)]
    fn adopt(&mut self) {
        self.outstanding += 1;
    }

    #[inline(always)]
    fn finish_one(&mut self) {
        self.outstanding -= 1;
        self.session.finish_tasks(1);
    }
}

impl<P> Drop for TaskFrame<'_, '_, '_, P>
where
    P: ConcurrentSearchSpace,
{
    fn drop(&mut self) {
        if self.outstanding > 0 {
            self.session.finish_tasks(self.outstanding);
        }
    }
}
