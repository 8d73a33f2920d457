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

//! Sequential depth-first solver.
//!
//! Explores the space in exactly the order a recursive depth-first search
//! would: a node is checked against the visited set when it is reached, goal
//! tested, and then its children are explored one after another in the order
//! `legal_moves` returns them, each subtree to completion before the next. The
//! first goal found wins. Recursion is replaced by an explicit `SearchStack`,
//! so search depth is bounded by memory rather than by the thread's stack.
//!
//! Reaching "no solution" means every state reachable from the initial state
//! has been expanded once.

use crate::stack::SearchStack;
use std::sync::Arc;
use std::time::Instant;
use wayfinder_model::{path::PathNode, space::SearchSpace, visited::VisitedSet};
use wayfinder_search::{
    interrupt::{InterruptHandle, Interruptible, StopFlag},
    monitor::search_monitor::SearchMonitor,
    result::SolverOutcome,
    solver::Solver,
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

/// A single-threaded, deterministic depth-first solver.
#[derive(Debug, Clone, Default)]
pub struct DepthFirstSolver {
    stack_capacity: usize,
    interrupt: InterruptHandle,
}

impl DepthFirstSolver {
    /// Creates a new depth-first solver.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver whose frontier is allocated up front for
    /// `stack_capacity` pending moves.
    ///
    /// # Note
    ///
    /// This only moves the cost of the allocation to the start of each
    /// solve; the frontier still grows if the search needs more.
    #[inline]
    pub fn preallocated(stack_capacity: usize) -> Self {
        Self {
            stack_capacity,
            interrupt: InterruptHandle::new(),
        }
    }

    /// Returns a handle that interrupts the solve currently running on this solver.
    ///
    /// The solver stops before expanding its next node and reports
    /// `TerminationReason::Interrupted`.
    #[inline]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Runs the search on `space`.
    pub fn solve<P>(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move>
    where
        P: SearchSpace,
    {
        let stop = Arc::new(StopFlag::new());
        let weak = Arc::downgrade(&stop);
        let _attached = self
            .interrupt
            .attach(weak as std::sync::Weak<dyn Interruptible>);

        let session = DfsSearchSession {
            space,
            monitor,
            stack: SearchStack::preallocated(self.stack_capacity),
            visited: VisitedSet::new(),
            stop: &stop,
            tries: 0,
            states_visited: 0,
            max_depth: 0,
            start_time: Instant::now(),
        };
        session.run()
    }
}

impl<P> Solver<P> for DepthFirstSolver
where
    P: SearchSpace,
{
    fn name(&self) -> &str {
        "DepthFirstSolver"
    }

    fn solve(
        &mut self,
        space: &P,
        monitor: &mut dyn SearchMonitor<P::State, P::Move>,
    ) -> SolverOutcome<P::State, P::Move> {
        DepthFirstSolver::solve(self, space, monitor)
    }
}

/// Per-run state of the depth-first search.
struct DfsSearchSession<'a, P>
where
    P: SearchSpace,
{
    space: &'a P,
    monitor: &'a mut dyn SearchMonitor<P::State, P::Move>,
    stack: SearchStack<P::State, P::Move>,
    visited: VisitedSet<P::State>,
    stop: &'a StopFlag,
    tries: u64,
    states_visited: u64,
    max_depth: usize,
    start_time: Instant,
}

/// How the main loop ended.
enum Verdict<S, M> {
    Found(Arc<PathNode<S, M>>),
    Exhausted,
    Interrupted,
}

impl<'a, P> DfsSearchSession<'a, P>
where
    P: SearchSpace,
{
    fn run(mut self) -> SolverOutcome<P::State, P::Move> {
        let initial = self.space.initial_state();
        log::debug!("depth-first search started");
        self.monitor.on_enter_search(&initial);

        let verdict = self.search(PathNode::root(initial.clone()));

        let statistics = self.statistics();
        let outcome = match verdict {
            Verdict::Found(node) => SolverOutcome::solved(node.to_solution(), statistics),
            Verdict::Exhausted => SolverOutcome::no_solution(statistics),
            Verdict::Interrupted => SolverOutcome::interrupted(statistics),
        };

        log::debug!(
            "depth-first search finished: {} ({} states visited)",
            outcome,
            outcome.statistics.states_visited
        );
        self.monitor.on_exit_search(&outcome.final_report(&initial));
        outcome
    }

    fn search(&mut self, root: Arc<PathNode<P::State, P::Move>>) -> Verdict<P::State, P::Move> {
        if let Some(found) = self.visit(root) {
            return found;
        }

        while let Some(pending) = self.stack.pop() {
            let state = self.space.apply_move(pending.parent.state(), &pending.mv);
            let child = PathNode::child(&pending.parent, pending.mv, state);
            if let Some(found) = self.visit(child) {
                return found;
            }
        }

        Verdict::Exhausted
    }

    /// Visits `node`: returns a verdict if the search ends here, otherwise
    /// pushes its children.
    #[inline]
    fn visit(
        &mut self,
        node: Arc<PathNode<P::State, P::Move>>,
    ) -> Option<Verdict<P::State, P::Move>> {
        if self.stop.is_raised() {
            return Some(Verdict::Interrupted);
        }

        self.tries += 1;
        if self.space.already_seen(node.state(), &self.visited) {
            return None;
        }

        self.states_visited += 1;
        self.max_depth = self.max_depth.max(node.depth());
        self.monitor.on_refresh(node.state(), self.tries);

        if self.space.is_goal(node.state()) {
            return Some(Verdict::Found(node));
        }

        let moves = self.space.legal_moves(node.state());
        self.stack.push_children(&node, moves);
        None
    }

    fn statistics(&self) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .tries(self.tries)
            .states_visited(self.states_visited)
            .max_depth(self.max_depth)
            .used_threads(1)
            .solve_duration(self.start_time.elapsed())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::DepthFirstSolver;
    use std::thread;
    use std::time::Duration;
    use wayfinder_model::fixtures::{
        BinaryTree, Branch, ChainMove, Counting, Grid, LinearChain, TwoCycle, replay,
    };
    use wayfinder_model::space::SearchSpace;
    use wayfinder_search::monitor::no_op::NoOperationMonitor;
    use wayfinder_search::monitor::recording::RecordingMonitor;
    use wayfinder_search::result::TerminationReason;

    #[test]
    fn test_linear_chain() {
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&LinearChain::new(2), &mut NoOperationMonitor::new());
        assert_eq!(
            outcome.moves(),
            Some(&[ChainMove::Advance, ChainMove::Advance][..])
        );
        assert_eq!(outcome.reason, TerminationReason::GoalReached);
        assert_eq!(outcome.statistics.max_depth, 2);
    }

    #[test]
    fn test_statistics_report_no_pool_tasks() {
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&BinaryTree::new(3, 0b111), &mut NoOperationMonitor::new());
        let stats = &outcome.statistics;
        assert_eq!(stats.states_visited, 15);
        assert_eq!(stats.used_threads, 1);
        assert_eq!(stats.tasks_submitted, 0);
        assert_eq!(stats.tasks_inlined, 0);
        assert_eq!(stats.tasks_discarded, 0);
    }

    #[test]
    fn test_two_cycle_has_no_solution() {
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&TwoCycle, &mut NoOperationMonitor::new());
        assert!(outcome.has_no_solution());
        assert_eq!(outcome.reason, TerminationReason::SearchSpaceExhausted);
        assert_eq!(outcome.statistics.states_visited, 2);
    }

    #[test]
    fn test_first_branch_wins_in_move_order() {
        // Every leaf of height 3 has a path; the target is the all-ones leaf,
        // so the solver has to back out of the zero branches in order.
        let tree = BinaryTree::new(3, 0b111);
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&tree, &mut NoOperationMonitor::new());
        assert_eq!(outcome.moves(), Some(&tree.expected_path()[..]));
        // The all-ones leaf is the last node in preorder.
        assert_eq!(outcome.statistics.states_visited, tree.num_nodes());
    }

    #[test]
    fn test_visits_leftmost_goal_immediately() {
        let tree = BinaryTree::new(4, 0);
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&tree, &mut NoOperationMonitor::new());
        assert_eq!(outcome.moves(), Some(&[Branch::Zero; 4][..]));
        assert_eq!(outcome.statistics.states_visited, 5);
    }

    #[test]
    fn test_goal_at_initial_state_gives_empty_path() {
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&LinearChain::new(0), &mut NoOperationMonitor::new());
        assert!(outcome.is_solved());
        assert_eq!(outcome.moves(), Some(&[][..]));
    }

    #[test]
    fn test_each_state_expanded_once() {
        let grid = Grid::parse(
            "S...\n\
             .##.\n\
             ....",
        );
        let counting = Counting::new(grid);
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&counting, &mut NoOperationMonitor::new());
        assert!(outcome.has_no_solution());
        assert_eq!(counting.max_new_reports(), 1);
        assert_eq!(counting.distinct_new(), 10);
        assert_eq!(counting.expansions() as usize, counting.distinct_new());
    }

    #[test]
    fn test_solution_replays_to_goal() {
        let grid = Grid::parse(
            "S.#....\n\
             ..#.##.\n\
             ....#G.",
        );
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&grid, &mut NoOperationMonitor::new());
        let moves = outcome.moves().expect("grid is solvable");
        assert!(grid.is_goal(&replay(&grid, moves)));
    }

    #[test]
    fn test_monitor_sees_every_visit_and_one_exit() {
        let tree = BinaryTree::new(3, 0b101);
        let mut monitor = RecordingMonitor::new();
        let mut solver = DepthFirstSolver::new();
        let outcome = solver.solve(&tree, &mut monitor);

        assert_eq!(monitor.enter_calls(), 1);
        assert_eq!(monitor.exit_calls(), 1);
        assert_eq!(monitor.refresh_calls(), outcome.statistics.states_visited);
        assert_eq!(monitor.final_path(), outcome.moves());
        assert_eq!(monitor.final_tries(), Some(outcome.statistics.tries));
        assert!(tree.is_goal(monitor.final_state().unwrap()));
    }

    #[test]
    fn test_final_state_is_initial_when_unsolved() {
        let mut monitor = RecordingMonitor::new();
        let mut solver = DepthFirstSolver::new();
        let _ = solver.solve(&TwoCycle, &mut monitor);
        assert_eq!(monitor.final_state(), Some(&TwoCycle.initial_state()));
        assert!(monitor.final_path().is_none());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let chain = LinearChain::new(200_000);
        let mut solver = DepthFirstSolver::preallocated(16);
        let outcome = solver.solve(&chain, &mut NoOperationMonitor::new());
        assert_eq!(outcome.moves().map(<[ChainMove]>::len), Some(200_000));
    }

    #[test]
    fn test_interrupt_stops_search() {
        // Height 40 cannot be exhausted; only the interrupt ends the run.
        let tree = BinaryTree::new(40, (1 << 40) - 1);
        let mut solver = DepthFirstSolver::new();
        let handle = solver.interrupt_handle();

        let interrupter = thread::spawn(move || {
            while !handle.interrupt() {
                thread::sleep(Duration::from_millis(1));
            }
        });

        let outcome = solver.solve(&tree, &mut NoOperationMonitor::new());
        interrupter.join().unwrap();

        assert!(outcome.is_unknown());
        assert_eq!(outcome.reason, TerminationReason::Interrupted);
        assert!(!solver.interrupt_handle().is_attached());
    }
}
