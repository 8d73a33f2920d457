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

use crate::monitor::search_monitor::FinalReport;
use crate::stats::SolverStatistics;
use wayfinder_model::solution::Solution;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<S, M> {
    /// A goal state was reached.
    Solved(Solution<S, M>),
    /// Every reachable state was expanded without reaching a goal.
    NoSolution,
    /// The solver stopped before it could decide either way.
    Unknown,
}

impl<S, M> std::fmt::Display for SolverResult<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Solved(solution) => write!(f, "Solved(moves={})", solution.len()),
            SolverResult::NoSolution => write!(f, "NoSolution"),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// A goal state was published first.
    GoalReached,
    /// The frontier ran dry.
    SearchSpaceExhausted,
    /// The caller interrupted the wait for a result.
    Interrupted,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::GoalReached => write!(f, "Goal Reached"),
            TerminationReason::SearchSpaceExhausted => write!(f, "Search Space Exhausted"),
            TerminationReason::Interrupted => write!(f, "Interrupted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<S, M> {
    pub result: SolverResult<S, M>,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl<S, M> SolverOutcome<S, M> {
    #[inline]
    pub fn new(
        result: SolverResult<S, M>,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn solved(solution: Solution<S, M>, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Solved(solution),
            TerminationReason::GoalReached,
            statistics,
        )
    }

    #[inline]
    pub fn no_solution(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::NoSolution,
            TerminationReason::SearchSpaceExhausted,
            statistics,
        )
    }

    #[inline]
    pub fn interrupted(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Unknown,
            TerminationReason::Interrupted,
            statistics,
        )
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self.result, SolverResult::Solved(_))
    }

    #[inline]
    pub fn has_no_solution(&self) -> bool {
        matches!(self.result, SolverResult::NoSolution)
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self.result, SolverResult::Unknown)
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution<S, M>> {
        match &self.result {
            SolverResult::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Returns the moves of the solution, if one was found.
    #[inline]
    pub fn moves(&self) -> Option<&[M]> {
        self.solution().map(Solution::moves)
    }

    #[inline]
    pub fn into_moves(self) -> Option<Vec<M>> {
        match self.result {
            SolverResult::Solved(solution) => Some(solution.into_moves()),
            _ => None,
        }
    }

    /// Builds the report handed to `SearchMonitor::on_exit_search`.
    ///
    /// The final state is the goal when solved and `initial` otherwise.
    pub fn final_report<'a>(&'a self, initial: &'a S) -> FinalReport<'a, S, M> {
        let (path, final_state) = match &self.result {
            SolverResult::Solved(solution) => (Some(solution.moves()), solution.goal()),
            _ => (None, initial),
        };
        FinalReport {
            path,
            final_state,
            tries: self.statistics.tries,
            elapsed: self.statistics.solve_duration,
        }
    }
}

impl<S, M> std::fmt::Display for SolverOutcome<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverOutcome(result: {}, reason: {}, tries: {})",
            self.result, self.reason, self.statistics.tries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SolverStatisticsBuilder;
    use std::time::Duration;

    fn stats() -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .tries(5)
            .solve_duration(Duration::from_millis(9))
            .build()
    }

    #[test]
    fn test_solved_outcome_helpers() {
        let outcome = SolverOutcome::solved(Solution::new(vec!['x', 'y'], 2u8), stats());
        assert!(outcome.is_solved());
        assert!(!outcome.has_no_solution());
        assert_eq!(outcome.reason, TerminationReason::GoalReached);
        assert_eq!(outcome.moves(), Some(&['x', 'y'][..]));
        assert_eq!(outcome.into_moves(), Some(vec!['x', 'y']));
    }

    #[test]
    fn test_no_solution_and_interrupted() {
        let none = SolverOutcome::<u8, char>::no_solution(stats());
        assert!(none.has_no_solution());
        assert_eq!(none.reason, TerminationReason::SearchSpaceExhausted);
        assert!(none.moves().is_none());

        let cut = SolverOutcome::<u8, char>::interrupted(stats());
        assert!(cut.is_unknown());
        assert_eq!(cut.reason, TerminationReason::Interrupted);
        assert!(cut.into_moves().is_none());
    }

    #[test]
    fn test_final_report_uses_goal_or_initial() {
        let solved = SolverOutcome::solved(Solution::new(vec!['a'], 7u8), stats());
        let report = solved.final_report(&0);
        assert_eq!(*report.final_state, 7);
        assert_eq!(report.path, Some(&['a'][..]));
        assert_eq!(report.tries, 5);
        assert_eq!(report.elapsed, Duration::from_millis(9));

        let none = SolverOutcome::<u8, char>::no_solution(stats());
        let report = none.final_report(&0);
        assert_eq!(*report.final_state, 0);
        assert!(report.path.is_none());
    }

    #[test]
    fn test_display() {
        let outcome = SolverOutcome::solved(Solution::new(vec![1u8, 2, 3], 0u8), stats());
        assert_eq!(
            format!("{}", outcome),
            "SolverOutcome(result: Solved(moves=3), reason: Goal Reached, tries: 5)"
        );
    }
}
