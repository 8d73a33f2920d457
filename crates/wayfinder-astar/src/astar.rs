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

//! Priority-ordered (A*) solver.
//!
//! Nodes are expanded in order of `f = g + h`, where `g` is the cost of the
//! path so far and `h` the space's `estimate`. The goal test happens when a
//! node is expanded, not when it is generated, so the first goal expanded is a
//! cheapest one whenever `estimate` never overestimates.
//!
//! Duplicates are handled by remembering the cheapest known `g` for every
//! state. A state reached again by a strictly cheaper path is pushed again and
//! re-expanded, which keeps the result optimal for admissible estimates that are
//! not consistent; entries superseded this way are skipped when popped.
//!
//! States are keyed by their own `Eq` and `Hash`; `SearchSpace::already_seen`
//! is not consulted, so canonicalisation done there does not apply here.

use crate::frontier::Frontier;
use num_traits::Saturating;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Weak};
use std::time::Instant;
use wayfinder_model::{cost::CostModel, path::PathNode};
use wayfinder_search::{
    interrupt::{InterruptHandle, Interruptible, StopFlag},
    monitor::search_monitor::SearchMonitor,
    result::SolverOutcome,
    solver::Solver,
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

/// Outcome of an A* run together with the cost of the path it found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AStarOutcome<S, M, C> {
    pub outcome: SolverOutcome<S, M>,
    /// Total move cost of the solution, `None` when unsolved.
    pub cost: Option<C>,
}

impl<S, M, C> AStarOutcome<S, M, C> {
    #[inline]
    pub fn outcome(&self) -> &SolverOutcome<S, M> {
        &self.outcome
    }

    #[inline]
    pub fn cost(&self) -> Option<&C> {
        self.cost.as_ref()
    }

    #[inline]
    pub fn into_outcome(self) -> SolverOutcome<S, M> {
        self.outcome
    }
}

impl<S, M, C> std::fmt::Display for AStarOutcome<S, M, C>
where
    C: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cost {
            Some(cost) => write!(f, "{} with cost {}", self.outcome, cost),
            None => write!(f, "{}", self.outcome),
        }
    }
}

/// A single-threaded A* solver.
#[derive(Debug, Clone, Default)]
pub struct AStarSolver {
    frontier_capacity: usize,
    interrupt: InterruptHandle,
}

impl AStarSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver whose open list is allocated up front for
    /// `frontier_capacity` entries.
    #[inline]
    pub fn preallocated(frontier_capacity: usize) -> Self {
        Self {
            frontier_capacity,
            interrupt: InterruptHandle::new(),
        }
    }

    /// Returns a handle that interrupts the solve currently running on this solver.
    #[inline]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Runs the search on `space` and returns the outcome with the path cost.
    pub fn solve<P>(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> AStarOutcome<P::State, P::Move, P::Cost>
    where
        P: CostModel,
    {
        let stop = Arc::new(StopFlag::new());
        let target: Weak<dyn Interruptible> = Arc::downgrade(&stop) as _;
        let _attached = self.interrupt.attach(target);

        let session = AStarSearchSession {
            space,
            monitor,
            frontier: Frontier::preallocated(self.frontier_capacity),
            best_g: FxHashMap::default(),
            stop: &stop,
            tries: 0,
            expansions: 0,
            max_depth: 0,
            start_time: Instant::now(),
        };
        session.run()
    }
}

impl<P> Solver<P> for AStarSolver
where
    P: CostModel,
{
    fn name(&self) -> &str {
        "AStarSolver"
    }

    fn solve(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move> {
        AStarSolver::solve(self, space, monitor).into_outcome()
    }
}

type Node<S, M> = Arc<PathNode<S, M>>;

enum Verdict<S, M, C> {
    Found(Node<S, M>, C),
    Exhausted,
    Interrupted,
}

struct AStarSearchSession<'a, P>
where
    P: CostModel,
{
    space: &'a P,
    monitor: &'a mut dyn SearchMonitor<P::State, P::Move>,
    frontier: Frontier<P::Cost, Node<P::State, P::Move>>,
    best_g: FxHashMap<P::State, P::Cost>,
    stop: &'a StopFlag,
    tries: u64,
    expansions: u64,
    max_depth: usize,
    start_time: Instant,
}

impl<'a, P> AStarSearchSession<'a, P>
where
    P: CostModel,
{
    fn run(mut self) -> AStarOutcome<P::State, P::Move, P::Cost> {
        let initial = self.space.initial_state();
        log::debug!("A* search started");
        self.monitor.on_enter_search(&initial);

        let verdict = self.search(PathNode::root(initial.clone()));

        let statistics = self.statistics();
        let (outcome, cost) = match verdict {
            Verdict::Found(node, cost) => (
                SolverOutcome::solved(node.to_solution(), statistics),
                Some(cost),
            ),
            Verdict::Exhausted => (SolverOutcome::no_solution(statistics), None),
            Verdict::Interrupted => (SolverOutcome::interrupted(statistics), None),
        };

        match &cost {
            Some(cost) => log::debug!("A* search finished: {} at cost {}", outcome, cost),
            None => log::debug!("A* search finished: {}", outcome),
        }
        self.monitor.on_exit_search(&outcome.final_report(&initial));
        AStarOutcome { outcome, cost }
    }

    fn search(&mut self, root: Node<P::State, P::Move>) -> Verdict<P::State, P::Move, P::Cost> {
        let zero: P::Cost = num_traits::zero();
        self.best_g.insert(root.state().clone(), zero);
        self.frontier.push(self.space.estimate(root.state()), zero, root);

        while let Some((g, node)) = self.frontier.pop() {
            if self.stop.is_raised() {
                return Verdict::Interrupted;
            }

            self.tries += 1;
            if self.best_g.get(node.state()).is_some_and(|&best| best < g) {
                continue;
            }

            self.expansions += 1;
            self.max_depth = self.max_depth.max(node.depth());
            self.monitor.on_refresh(node.state(), self.tries);

            if self.space.is_goal(node.state()) {
                return Verdict::Found(node, g);
            }

            self.expand(&node, g);
        }

        Verdict::Exhausted
    }

    fn expand(&mut self, node: &Node<P::State, P::Move>, g: P::Cost) {
        for mv in self.space.legal_moves(node.state()) {
            let child_g = g.saturating_add(self.space.move_cost(node.state(), &mv));
            let state = self.space.apply_move(node.state(), &mv);

            if self.best_g.get(&state).is_some_and(|&known| known <= child_g) {
                continue;
            }

            self.best_g.insert(state.clone(), child_g);
            let f = child_g.saturating_add(self.space.estimate(&state));
            self.frontier.push(f, child_g, PathNode::child(node, mv, state));
        }
    }

    fn statistics(&self) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .tries(self.tries)
            .states_visited(self.expansions)
            .max_depth(self.max_depth)
            .used_threads(1)
            .solve_duration(self.start_time.elapsed())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::AStarSolver;
    use rustc_hash::FxHashMap;
    use std::thread;
    use std::time::Duration;
    use wayfinder_model::cost::CostModel;
    use wayfinder_model::fixtures::{
        ChainMove, Grid, LinearChain, Slide, SlidingPuzzle, TwoCycle, replay,
    };
    use wayfinder_model::space::SearchSpace;
    use wayfinder_model::visited::VisitedSet;
    use wayfinder_search::monitor::no_op::NoOperationMonitor;
    use wayfinder_search::monitor::recording::RecordingMonitor;
    use wayfinder_search::result::TerminationReason;
    use wayfinder_search::solver::Solver;

    /// Hides the estimate of a space, turning A* into uniform-cost search.
    struct Uniform<S>(S);

    impl<S> SearchSpace for Uniform<S>
    where
        S: SearchSpace,
    {
        type State = S::State;
        type Move = S::Move;

        fn initial_state(&self) -> S::State {
            self.0.initial_state()
        }

        fn is_goal(&self, state: &S::State) -> bool {
            self.0.is_goal(state)
        }

        fn legal_moves(&self, state: &S::State) -> Vec<S::Move> {
            self.0.legal_moves(state)
        }

        fn apply_move(&self, state: &S::State, mv: &S::Move) -> S::State {
            self.0.apply_move(state, mv)
        }
    }

    impl<S> CostModel for Uniform<S>
    where
        S: CostModel,
    {
        type Cost = S::Cost;

        fn move_cost(&self, state: &S::State, mv: &S::Move) -> S::Cost {
            self.0.move_cost(state, mv)
        }
    }

    #[test]
    fn test_linear_chain() {
        let result = AStarSolver::new().solve(&LinearChain::new(2), &mut NoOperationMonitor::new());
        assert_eq!(
            result.outcome.moves(),
            Some(&[ChainMove::Advance, ChainMove::Advance][..])
        );
        assert_eq!(result.cost, Some(2));
    }

    #[test]
    fn test_two_cycle_has_no_solution() {
        let result = AStarSolver::new().solve(&TwoCycle, &mut NoOperationMonitor::new());
        assert!(result.outcome.has_no_solution());
        assert_eq!(result.outcome.reason, TerminationReason::SearchSpaceExhausted);
        assert_eq!(result.cost, None);
    }

    #[test]
    fn test_grid_path_is_shortest() {
        // The direct route east is walled off; the shortest detour is 12 steps.
        let grid = Grid::parse(
            "S..#...\n\
             .#.#.#.\n\
             .#...#G",
        );
        let result = AStarSolver::new().solve(&grid, &mut NoOperationMonitor::new());
        let moves = result.outcome.moves().expect("grid is solvable");
        assert!(grid.is_goal(&replay(&grid, moves)));
        assert_eq!(moves.len(), 12);
        assert_eq!(result.cost, Some(12));
    }

    #[test]
    fn test_heuristic_matches_uniform_cost() {
        let puzzle = SlidingPuzzle::scrambled(
            3,
            3,
            &[
                Slide::Up,
                Slide::Left,
                Slide::Down,
                Slide::Left,
                Slide::Up,
                Slide::Right,
                Slide::Up,
                Slide::Left,
            ],
        );

        let uniform_cost = Uniform(puzzle.clone());
        let informed = AStarSolver::new().solve(&puzzle, &mut NoOperationMonitor::new());
        let uniform = AStarSolver::new().solve(&uniform_cost, &mut NoOperationMonitor::new());

        assert_eq!(informed.cost, uniform.cost);
        assert!(informed.cost.is_some_and(|c| c <= 8));
        let moves = informed.outcome.moves().unwrap();
        assert!(puzzle.is_goal(&replay(&puzzle, moves)));
        let informed_visits = informed.outcome.statistics.states_visited;
        assert!(informed_visits <= uniform.outcome.statistics.states_visited);
    }

    /// S -> A (1), S -> B (2), A -> C (3), B -> C (1), C -> G (3).
    ///
    /// The estimate is admissible but not consistent at `B`, so `C` is first
    /// expanded through `A` at cost 4 and has to be reopened at cost 3.
    struct Reopening {
        edges: FxHashMap<char, Vec<(char, u32)>>,
    }

    impl Reopening {
        fn new() -> Self {
            let mut edges = FxHashMap::default();
            edges.insert('S', vec![('A', 1), ('B', 2)]);
            edges.insert('A', vec![('C', 3)]);
            edges.insert('B', vec![('C', 1)]);
            edges.insert('C', vec![('G', 3)]);
            Self { edges }
        }
    }

    impl SearchSpace for Reopening {
        type State = char;
        type Move = char;

        fn initial_state(&self) -> char {
            'S'
        }

        fn is_goal(&self, state: &char) -> bool {
            *state == 'G'
        }

        fn legal_moves(&self, state: &char) -> Vec<char> {
            self.edges
                .get(state)
                .map(|out| out.iter().map(|&(to, _)| to).collect())
                .unwrap_or_default()
        }

        fn apply_move(&self, _state: &char, mv: &char) -> char {
            *mv
        }
    }

    impl CostModel for Reopening {
        type Cost = u32;

        fn move_cost(&self, state: &char, mv: &char) -> u32 {
            self.edges[state]
                .iter()
                .find(|&&(to, _)| to == *mv)
                .map_or(0, |&(_, cost)| cost)
        }

        fn estimate(&self, state: &char) -> u32 {
            if *state == 'B' { 4 } else { 0 }
        }
    }

    #[test]
    fn test_reopens_state_reached_more_cheaply() {
        let result = AStarSolver::new().solve(&Reopening::new(), &mut NoOperationMonitor::new());
        assert_eq!(result.outcome.moves(), Some(&['B', 'C', 'G'][..]));
        assert_eq!(result.cost, Some(6));
        // S, A, C, B, C again, G.
        assert_eq!(result.outcome.statistics.states_visited, 6);
    }

    #[test]
    fn test_solver_trait_reports_to_monitor() {
        let mut monitor = RecordingMonitor::new();
        let mut solver = AStarSolver::preallocated(64);
        let outcome = Solver::solve(&mut solver, &LinearChain::new(3), &mut monitor);

        assert_eq!(Solver::<LinearChain>::name(&solver), "AStarSolver");
        assert!(outcome.is_solved());
        assert_eq!(monitor.enter_calls(), 1);
        assert_eq!(monitor.exit_calls(), 1);
        assert_eq!(monitor.refresh_calls(), 4);
        assert_eq!(monitor.final_state(), Some(&3));
    }

    #[test]
    fn test_interrupt_handle_detached_after_solve() {
        let mut solver = AStarSolver::new();
        let handle = solver.interrupt_handle();
        let _ = solver.solve(&LinearChain::new(1), &mut NoOperationMonitor::new());
        assert!(!handle.is_attached());
        assert!(!handle.interrupt());
    }

    /// The integers, reachable from zero by steps of one or two; no goal.
    struct Endless;

    impl SearchSpace for Endless {
        type State = u64;
        type Move = u64;

        fn initial_state(&self) -> u64 {
            0
        }

        fn is_goal(&self, _state: &u64) -> bool {
            false
        }

        fn legal_moves(&self, _state: &u64) -> Vec<u64> {
            vec![1, 2]
        }

        fn apply_move(&self, state: &u64, mv: &u64) -> u64 {
            state + mv
        }
    }

    impl CostModel for Endless {
        type Cost = u64;

        fn move_cost(&self, _state: &u64, mv: &u64) -> u64 {
            *mv
        }
    }

    #[test]
    fn test_interrupt_stops_search() {
        let mut solver = AStarSolver::new();
        let handle = solver.interrupt_handle();

        let interrupter = thread::spawn(move || {
            while !handle.interrupt() {
                thread::sleep(Duration::from_millis(1));
            }
        });

        let result = solver.solve(&Endless, &mut NoOperationMonitor::new());
        interrupter.join().unwrap();

        assert!(result.outcome.is_unknown());
        assert_eq!(result.outcome.reason, TerminationReason::Interrupted);
        assert_eq!(result.cost, None);
    }

    /// Positions on a ring of six where opposite positions are symmetric.
    /// `already_seen` folds them together, which A* does not consult.
    struct Ring;

    impl SearchSpace for Ring {
        type State = u8;
        type Move = ();

        fn initial_state(&self) -> u8 {
            0
        }

        fn is_goal(&self, _state: &u8) -> bool {
            false
        }

        fn legal_moves(&self, _state: &u8) -> Vec<()> {
            vec![()]
        }

        fn apply_move(&self, state: &u8, _mv: &()) -> u8 {
            (state + 1) % 6
        }

        fn already_seen(&self, _state: &u8, _visited: &VisitedSet<u8>) -> bool {
            unreachable!("cheapest-first search keys states by Eq and Hash")
        }
    }

    impl CostModel for Ring {
        type Cost = u8;

        fn move_cost(&self, _state: &u8, _mv: &()) -> u8 {
            1
        }
    }

    #[test]
    fn test_states_are_keyed_by_eq_and_hash() {
        let result = AStarSolver::new().solve(&Ring, &mut NoOperationMonitor::new());
        assert!(result.outcome.has_no_solution());
        assert_eq!(result.outcome.statistics.states_visited, 6);
    }

    /// Two moves of cost 200 each; the total saturates at `u8::MAX`.
    struct Expensive;

    impl SearchSpace for Expensive {
        type State = u8;
        type Move = ();

        fn initial_state(&self) -> u8 {
            0
        }

        fn is_goal(&self, state: &u8) -> bool {
            *state == 2
        }

        fn legal_moves(&self, state: &u8) -> Vec<()> {
            if *state < 2 { vec![()] } else { Vec::new() }
        }

        fn apply_move(&self, state: &u8, _mv: &()) -> u8 {
            state + 1
        }
    }

    impl CostModel for Expensive {
        type Cost = u8;

        fn move_cost(&self, _state: &u8, _mv: &()) -> u8 {
            200
        }
    }

    #[test]
    fn test_path_cost_saturates_instead_of_overflowing() {
        let result = AStarSolver::new().solve(&Expensive, &mut NoOperationMonitor::new());
        assert_eq!(result.outcome.moves().map(<[()]>::len), Some(2));
        assert_eq!(result.cost, Some(u8::MAX));
    }
}
