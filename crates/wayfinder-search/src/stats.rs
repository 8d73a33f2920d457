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

use std::time::Duration;

/// Statistics collected during the solving process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of expansion attempts, including ones cut off as duplicates.
    pub tries: u64,
    /// Number of distinct states that were expanded.
    pub states_visited: u64,
    /// Deepest path length seen during the search.
    pub max_depth: usize,
    /// Number of threads used during the solving process.
    pub used_threads: usize,
    /// Tasks handed to the worker pool.
    pub tasks_submitted: u64,
    /// Tasks continued on the worker that produced them.
    pub tasks_inlined: u64,
    /// Tasks dropped because the pool queue was full.
    pub tasks_discarded: u64,
    /// Total duration of the solving process.
    pub solve_duration: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Tries: {}", self.tries)?;
        writeln!(f, "  States Visited: {}", self.states_visited)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(
            f,
            "  Tasks (submitted/inlined/discarded): {}/{}/{}",
            self.tasks_submitted, self.tasks_inlined, self.tasks_discarded
        )?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    tries: u64,
    states_visited: u64,
    max_depth: usize,
    used_threads: usize,
    tasks_submitted: u64,
    tasks_inlined: u64,
    tasks_discarded: u64,
    solve_duration: Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    /// Creates a new `SolverStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            tries: 0,
            states_visited: 0,
            max_depth: 0,
            used_threads: 1,
            tasks_submitted: 0,
            tasks_inlined: 0,
            tasks_discarded: 0,
            solve_duration: Duration::ZERO,
        }
    }

    #[inline]
    pub fn tries(mut self, tries: u64) -> Self {
        self.tries = tries;
        self
    }

    #[inline]
    pub fn states_visited(mut self, states_visited: u64) -> Self {
        self.states_visited = states_visited;
        self
    }

    #[inline]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of threads used.
    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    #[inline]
    pub fn tasks_submitted(mut self, tasks_submitted: u64) -> Self {
        self.tasks_submitted = tasks_submitted;
        self
    }

    #[inline]
    pub fn tasks_inlined(mut self, tasks_inlined: u64) -> Self {
        self.tasks_inlined = tasks_inlined;
        self
    }

    #[inline]
    pub fn tasks_discarded(mut self, tasks_discarded: u64) -> Self {
        self.tasks_discarded = tasks_discarded;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            tries: self.tries,
            states_visited: self.states_visited,
            max_depth: self.max_depth,
            used_threads: self.used_threads,
            tasks_submitted: self.tasks_submitted,
            tasks_inlined: self.tasks_inlined,
            tasks_discarded: self.tasks_discarded,
            solve_duration: self.solve_duration,
        }
    }
}
