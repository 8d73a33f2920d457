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

//! Progress logging through the `log` facade.
//!
//! Refreshes arrive far more often than anyone wants to read them, so the
//! monitor only considers a refresh whose try count has all `step_mask` bits
//! clear, and then only emits a line if `interval` has passed since the last one.

use crate::monitor::search_monitor::{FinalReport, SearchMonitor};
use std::time::{Duration, Instant};

pub struct LogMonitor<S, M> {
    start_time: Instant,
    last_log_time: Instant,
    interval: Duration,
    step_mask: u64,
    lines: u64,
    _phantom: std::marker::PhantomData<fn() -> (S, M)>,
}

impl<S, M> LogMonitor<S, M> {
    pub fn new(interval: Duration, step_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            interval,
            step_mask,
            lines: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns how many progress lines have been emitted in the current run.
    #[inline]
    pub fn lines_emitted(&self) -> u64 {
        self.lines
    }

    #[inline(always)]
    fn log_line(&mut self, tries: u64) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f64();
        let rate = if elapsed > 0.0 {
            tries as f64 / elapsed
        } else {
            0.0
        };

        log::info!(
            "{:>9} | {:>14} tries | {:>12.0} tries/s",
            format!("{:.1}s", elapsed),
            tries,
            rate
        );

        self.last_log_time = now;
        self.lines += 1;
    }
}

impl<S, M> Default for LogMonitor<S, M> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<S, M> std::fmt::Debug for LogMonitor<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogMonitor")
            .field("interval", &self.interval)
            .field("step_mask", &self.step_mask)
            .field("lines", &self.lines)
            .finish()
    }
}

impl<S, M> std::fmt::Display for LogMonitor<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(interval: {}ms, step_mask: {:#x})",
            self.interval.as_millis(),
            self.step_mask
        )
    }
}

impl<S, M> SearchMonitor<S, M> for LogMonitor<S, M> {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, _initial: &S) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.lines = 0;
        log::info!("search started");
    }

    fn on_refresh(&mut self, _state: &S, tries: u64) {
        if (tries & self.step_mask) == 0 && self.last_log_time.elapsed() >= self.interval {
            self.log_line(tries);
        }
    }

    fn on_exit_search(&mut self, report: &FinalReport<'_, S, M>) {
        match report.path {
            Some(path) => log::info!(
                "search finished: solution with {} moves after {} tries in {}ms",
                path.len(),
                report.tries,
                report.elapsed_millis()
            ),
            None => log::info!(
                "search finished: no solution after {} tries in {}ms",
                report.tries,
                report.elapsed_millis()
            ),
        }
    }
}
