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

/// Everything known about a search once it has returned.
#[derive(Debug)]
pub struct FinalReport<'a, S, M> {
    /// The moves of the solution, or `None` if no solution was found.
    pub path: Option<&'a [M]>,
    /// The goal state when solved, otherwise the initial state.
    pub final_state: &'a S,
    /// Total number of expansion attempts.
    pub tries: u64,
    /// Wall-clock time spent inside `solve()`.
    pub elapsed: Duration,
}

impl<S, M> FinalReport<'_, S, M> {
    /// Returns `true` if the search found a solution.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Returns the elapsed time in whole milliseconds.
    #[inline]
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Observer of a single search run.
///
/// Methods take `&mut self`; a monitor is never called from two threads at
/// once. The `Send` bound lets the concurrent solver hand it to whichever
/// worker currently reports progress.
pub trait SearchMonitor<S, M>: Send {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the search starts.
    fn on_enter_search(&mut self, initial: &S);
    /// Called with the state currently being expanded and the tries so far.
    fn on_refresh(&mut self, state: &S, tries: u64);
    /// Called exactly once when the search has returned.
    fn on_exit_search(&mut self, report: &FinalReport<'_, S, M>);
}

impl<S, M, T> SearchMonitor<S, M> for &mut T
where
    T: SearchMonitor<S, M> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter_search(&mut self, initial: &S) {
        (**self).on_enter_search(initial);
    }

    #[inline]
    fn on_refresh(&mut self, state: &S, tries: u64) {
        (**self).on_refresh(state, tries);
    }

    #[inline]
    fn on_exit_search(&mut self, report: &FinalReport<'_, S, M>) {
        (**self).on_exit_search(report);
    }
}

impl<S, M> std::fmt::Debug for dyn SearchMonitor<S, M> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<S, M> std::fmt::Display for dyn SearchMonitor<S, M> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
