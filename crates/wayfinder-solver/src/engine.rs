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

//! Building and running a configured solver.

use crate::deadline::Deadline;
use crate::kind::SolverKind;
use std::sync::Arc;
use std::time::Duration;
use wayfinder_astar::astar::AStarSolver;
use wayfinder_dfs::dfs::DepthFirstSolver;
use wayfinder_model::{
    cost::CostModel,
    space::{ConcurrentSearchSpace, SearchSpace},
    visited::VisitedSet,
};
use wayfinder_parallel::{
    coin::CoinSource,
    config::{ConcurrentConfig, ConcurrentConfigBuilder, ConfigError, SaturationPolicy},
    solver::ConcurrentSolver,
};
use wayfinder_search::{
    interrupt::InterruptHandle, monitor::search_monitor::SearchMonitor, result::SolverOutcome,
    solver::Solver,
};

/// Presents a plain space to the cheapest-first solver with every move costing one.
///
/// Searching a `UnitCost` space cheapest-first is a breadth-first search: the
/// solution found has the fewest moves.
#[derive(Debug, Clone, Copy)]
pub struct UnitCost<'a, P>(pub &'a P);

impl<P> SearchSpace for UnitCost<'_, P>
where
    P: SearchSpace,
{
    type State = P::State;
    type Move = P::Move;

    #[inline]
    fn initial_state(&self) -> P::State {
        self.0.initial_state()
    }

    #[inline]
    fn is_goal(&self, state: &P::State) -> bool {
        self.0.is_goal(state)
    }

    #[inline]
    fn legal_moves(&self, state: &P::State) -> Vec<P::Move> {
        self.0.legal_moves(state)
    }

    #[inline]
    fn apply_move(&self, state: &P::State, mv: &P::Move) -> P::State {
        self.0.apply_move(state, mv)
    }

    #[inline]
    fn already_seen(&self, state: &P::State, visited: &VisitedSet<P::State>) -> bool {
        self.0.already_seen(state, visited)
    }
}

impl<P> CostModel for UnitCost<'_, P>
where
    P: SearchSpace,
{
    type Cost = u64;

    #[inline(always)]
    fn move_cost(&self, _state: &P::State, _mv: &P::Move) -> u64 {
        1
    }
}

enum Backend {
    DepthFirst(DepthFirstSolver),
    Concurrent(ConcurrentSolver),
    AStar(AStarSolver),
}

/// A configured solver of any `SolverKind`, optionally bounded by a time limit.
///
/// Build one with `SolverBuilder`. An engine can be reused for any number of
/// solves; every solve starts from scratch.
pub struct Engine {
    backend: Backend,
    deadline: Option<Deadline>,
}

impl Engine {
    /// Creates a depth-first engine without a time limit.
    #[inline]
    pub fn new() -> Self {
        Self {
            backend: Backend::DepthFirst(DepthFirstSolver::new()),
            deadline: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> SolverKind {
        match self.backend {
            Backend::DepthFirst(_) => SolverKind::DepthFirst,
            Backend::Concurrent(_) => SolverKind::Concurrent,
            Backend::AStar(_) => SolverKind::AStar,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.deadline.map(|d| d.limit())
    }

    /// Returns a handle that interrupts the solve currently running on this engine.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        match &self.backend {
            Backend::DepthFirst(solver) => solver.interrupt_handle(),
            Backend::Concurrent(solver) => solver.interrupt_handle(),
            Backend::AStar(solver) => solver.interrupt_handle(),
        }
    }

    /// Solves `space`, treating every move as costing one for `SolverKind::AStar`.
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
        self.run(|backend| match backend {
            Backend::DepthFirst(solver) => solver.solve(space, monitor),
            Backend::Concurrent(solver) => solver.solve(space, monitor),
            Backend::AStar(solver) => solver.solve(&UnitCost(space), monitor).into_outcome(),
        })
    }

    /// Solves `space` using its own move costs for `SolverKind::AStar`.
    ///
    /// The other kinds ignore the costs and behave exactly as `solve`.
    pub fn solve_weighted<P>(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move>
    where
        P: ConcurrentSearchSpace + CostModel,
        P::State: 'static,
        P::Move: 'static,
    {
        self.run(|backend| match backend {
            Backend::DepthFirst(solver) => solver.solve(space, monitor),
            Backend::Concurrent(solver) => solver.solve(space, monitor),
            Backend::AStar(solver) => solver.solve(space, monitor).into_outcome(),
        })
    }

    fn run<T, F>(&mut self, search: F) -> T
    where
        F: FnOnce(&mut Backend) -> T,
    {
        match self.deadline {
            Some(deadline) => {
                let handle = self.interrupt_handle();
                deadline.enforce(&handle, || search(&mut self.backend))
            }
            None => search(&mut self.backend),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Solver<P> for Engine
where
    P: ConcurrentSearchSpace,
    P::State: 'static,
    P::Move: 'static,
{
    fn name(&self) -> &str {
        match self.kind() {
            SolverKind::DepthFirst => "Engine(dfs)",
            SolverKind::Concurrent => "Engine(concurrent)",
            SolverKind::AStar => "Engine(astar)",
        }
    }

    fn solve(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move> {
        Engine::solve(self, space, monitor)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("kind", &self.kind())
            .field("time_limit", &self.time_limit())
            .finish()
    }
}

/// Configures an `Engine`.
///
/// Concurrent settings are validated by `build` and ignored by the other kinds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wayfinder_solver::{SolverBuilder, SolverKind};
///
/// let engine = SolverBuilder::new(SolverKind::Concurrent)
///     .with_depth_breadth_factor(0.25)
///     .with_num_workers(4)
///     .with_time_limit(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(engine.kind(), SolverKind::Concurrent);
/// ```
pub struct SolverBuilder {
    kind: SolverKind,
    concurrent: ConcurrentConfigBuilder,
    coin: Option<Arc<dyn CoinSource>>,
    preallocate: usize,
    time_limit: Option<Duration>,
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new(SolverKind::default())
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new(kind: SolverKind) -> Self {
        Self {
            kind,
            concurrent: ConcurrentConfigBuilder::new(),
            coin: None,
            preallocate: 0,
            time_limit: None,
        }
    }

    #[inline]
    pub fn with_kind(mut self, kind: SolverKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn with_depth_breadth_factor(mut self, factor: f64) -> Self {
        self.concurrent = self.concurrent.with_depth_breadth_factor(factor);
        self
    }

    #[inline]
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.concurrent = self.concurrent.with_num_workers(num_workers);
        self
    }

    #[inline]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.concurrent = self.concurrent.with_queue_capacity(queue_capacity);
        self
    }

    #[inline]
    pub fn with_saturation_policy(mut self, policy: SaturationPolicy) -> Self {
        self.concurrent = self.concurrent.with_saturation_policy(policy);
        self
    }

    #[inline]
    pub fn with_refresh_mask(mut self, refresh_mask: u64) -> Self {
        self.concurrent = self.concurrent.with_refresh_mask(refresh_mask);
        self
    }

    /// Replaces the source of the concurrent solver's depth/breadth draws.
    #[inline]
    pub fn with_coin<C>(mut self, coin: C) -> Self
    where
        C: CoinSource + 'static,
    {
        self.coin = Some(Arc::new(coin));
        self
    }

    /// Reserves room for `capacity` pending nodes up front (depth-first
    /// stack or cheapest-first open list).
    #[inline]
    pub fn with_preallocation(mut self, capacity: usize) -> Self {
        self.preallocate = capacity;
        self
    }

    /// Interrupts every solve that runs longer than `limit`.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builds the engine, validating the concurrent settings.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let config: ConcurrentConfig = self.concurrent.build()?;

        let backend = match self.kind {
            SolverKind::DepthFirst => {
                Backend::DepthFirst(DepthFirstSolver::preallocated(self.preallocate))
            }
            SolverKind::Concurrent => {
                let solver = ConcurrentSolver::new(config);
                Backend::Concurrent(match self.coin {
                    Some(coin) => solver.with_coin(coin),
                    None => solver,
                })
            }
            SolverKind::AStar => Backend::AStar(AStarSolver::preallocated(self.preallocate)),
        };

        log::debug!(
            "built {} engine (time limit: {:?})",
            self.kind,
            self.time_limit
        );
        Ok(Engine {
            backend,
            deadline: self.time_limit.map(Deadline::new),
        })
    }
}

impl std::fmt::Debug for SolverBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverBuilder")
            .field("kind", &self.kind)
            .field("concurrent", &self.concurrent)
            .field("custom_coin", &self.coin.is_some())
            .field("preallocate", &self.preallocate)
            .field("time_limit", &self.time_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, SolverBuilder, UnitCost};
    use crate::kind::SolverKind;
    use std::time::Duration;
    use wayfinder_model::cost::CostModel;
    use wayfinder_model::fixtures::{ChainMove, LinearChain};
    use wayfinder_parallel::coin::ConstantCoin;
    use wayfinder_parallel::config::ConfigError;
    use wayfinder_search::monitor::no_op::NoOperationMonitor;
    use wayfinder_search::solver::Solver;

    #[test]
    fn test_builder_builds_every_kind() {
        for kind in SolverKind::ALL {
            let engine = SolverBuilder::new(kind).build().unwrap();
            assert_eq!(engine.kind(), kind);
            assert_eq!(engine.time_limit(), None);
        }
    }

    #[test]
    fn test_builder_rejects_invalid_concurrent_settings() {
        let err = SolverBuilder::new(SolverKind::Concurrent)
            .with_depth_breadth_factor(1.5)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidDepthBreadthFactor(1.5));

        let err = SolverBuilder::new(SolverKind::Concurrent)
            .with_num_workers(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroWorkers);
    }

    #[test]
    fn test_unit_cost_charges_one_per_move() {
        let chain = LinearChain::new(5);
        let unit = UnitCost(&chain);
        assert_eq!(unit.move_cost(&0, &ChainMove::Advance), 1);
        assert_eq!(unit.estimate(&0), 0);
    }

    #[test]
    fn test_engine_solves_linear_chain_with_every_kind() {
        for kind in SolverKind::ALL {
            let mut engine = SolverBuilder::new(kind)
                .with_num_workers(2)
                .with_coin(ConstantCoin(0.0))
                .with_time_limit(Duration::from_secs(60))
                .build()
                .unwrap();
            let outcome = engine.solve(&LinearChain::new(2), &mut NoOperationMonitor::new());
            assert_eq!(
                outcome.moves(),
                Some(&[ChainMove::Advance, ChainMove::Advance][..]),
                "{} failed",
                kind
            );
        }
    }

    #[test]
    fn test_engine_as_solver_trait_object() {
        let mut engine = Engine::default();
        let solver: &mut dyn Solver<LinearChain> = &mut engine;
        assert_eq!(solver.name(), "Engine(dfs)");
        let outcome = solver.solve(&LinearChain::new(1), &mut NoOperationMonitor::new());
        assert!(outcome.is_solved());
    }
}
