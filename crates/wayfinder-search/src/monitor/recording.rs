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

//! A monitor that remembers what it was told.
//!
//! Mostly useful in tests, where a solver's event stream has to be checked
//! against what the solver reports in its outcome.

use crate::monitor::search_monitor::{FinalReport, SearchMonitor};

#[derive(Debug, Clone)]
pub struct RecordingMonitor<S, M> {
    enter_calls: u64,
    refresh_calls: u64,
    exit_calls: u64,
    last_tries: u64,
    initial_state: Option<S>,
    final_state: Option<S>,
    final_path: Option<Vec<M>>,
    final_tries: Option<u64>,
}

impl<S, M> RecordingMonitor<S, M> {
    pub fn new() -> Self {
        Self {
            enter_calls: 0,
            refresh_calls: 0,
            exit_calls: 0,
            last_tries: 0,
            initial_state: None,
            final_state: None,
            final_path: None,
            final_tries: None,
        }
    }

    #[inline]
    pub fn enter_calls(&self) -> u64 {
        self.enter_calls
    }

    #[inline]
    pub fn refresh_calls(&self) -> u64 {
        self.refresh_calls
    }

    #[inline]
    pub fn exit_calls(&self) -> u64 {
        self.exit_calls
    }

    /// The try count carried by the most recent refresh.
    #[inline]
    pub fn last_tries(&self) -> u64 {
        self.last_tries
    }

    #[inline]
    pub fn initial_state(&self) -> Option<&S> {
        self.initial_state.as_ref()
    }

    #[inline]
    pub fn final_state(&self) -> Option<&S> {
        self.final_state.as_ref()
    }

    /// The move list of the final report, if the search ended with a path.
    #[inline]
    pub fn final_path(&self) -> Option<&[M]> {
        self.final_path.as_deref()
    }

    #[inline]
    pub fn final_tries(&self) -> Option<u64> {
        self.final_tries
    }
}

impl<S, M> Default for RecordingMonitor<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> SearchMonitor<S, M> for RecordingMonitor<S, M>
where
    S: Clone + Send,
    M: Clone + Send,
{
    fn name(&self) -> &str {
        "RecordingMonitor"
    }

    fn on_enter_search(&mut self, initial: &S) {
        self.enter_calls += 1;
        self.initial_state = Some(initial.clone());
    }

    fn on_refresh(&mut self, _state: &S, tries: u64) {
        self.refresh_calls += 1;
        self.last_tries = tries;
    }

    fn on_exit_search(&mut self, report: &FinalReport<'_, S, M>) {
        self.exit_calls += 1;
        self.final_state = Some(report.final_state.clone());
        self.final_path = report.path.map(<[M]>::to_vec);
        self.final_tries = Some(report.tries);
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingMonitor;
    use crate::monitor::search_monitor::{FinalReport, SearchMonitor};
    use std::time::Duration;

    #[test]
    fn test_records_event_stream() {
        let mut monitor = RecordingMonitor::<u32, char>::new();
        monitor.on_enter_search(&7);
        monitor.on_refresh(&8, 1);
        monitor.on_refresh(&9, 2);

        let path = ['a', 'b'];
        let report = FinalReport {
            path: Some(&path[..]),
            final_state: &9,
            tries: 2,
            elapsed: Duration::from_millis(3),
        };
        monitor.on_exit_search(&report);

        assert_eq!(monitor.enter_calls(), 1);
        assert_eq!(monitor.refresh_calls(), 2);
        assert_eq!(monitor.exit_calls(), 1);
        assert_eq!(monitor.last_tries(), 2);
        assert_eq!(monitor.initial_state(), Some(&7));
        assert_eq!(monitor.final_state(), Some(&9));
        assert_eq!(monitor.final_path(), Some(&['a', 'b'][..]));
        assert_eq!(monitor.final_tries(), Some(2));
    }

    #[test]
    fn test_no_path_recorded_when_unsolved() {
        let mut monitor = RecordingMonitor::<u32, char>::default();
        monitor.on_exit_search(&FinalReport {
            path: None,
            final_state: &0,
            tries: 0,
            elapsed: Duration::ZERO,
        });
        assert!(monitor.final_path().is_none());
        assert_eq!(monitor.final_state(), Some(&0));
    }
}
