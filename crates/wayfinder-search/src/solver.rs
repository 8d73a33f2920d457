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

use crate::{monitor::search_monitor::SearchMonitor, result::SolverOutcome};
use wayfinder_model::space::SearchSpace;

/// A search strategy that can be run against any space it supports.
///
/// Every `solve` reports to `monitor` in the order enter, refresh*, exit,
/// with exactly one exit call, and never fails: an unreachable goal is
/// `SolverResult::NoSolution`, an interrupted run is `SolverResult::Unknown`.
pub trait Solver<S>
where
    S: SearchSpace,
{
    fn name(&self) -> &str;

    fn solve(
        &mut self,
        space: &S,
        monitor: &mut dyn SearchMonitor<S::State, S::Move>,
    ) -> SolverOutcome<S::State, S::Move>;
}

impl<S> std::fmt::Debug for dyn Solver<S> + '_
where
    S: SearchSpace,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solver({})", self.name())
    }
}

impl<S> std::fmt::Display for dyn Solver<S> + '_
where
    S: SearchSpace,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solver({})", self.name())
    }
}
