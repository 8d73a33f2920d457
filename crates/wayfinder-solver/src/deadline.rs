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

//! Wall-clock limits for a solve.
//!
//! The solvers have no notion of time; they only stop when interrupted. A
//! `Deadline` runs a watchdog thread next to the solve that fires the solver's
//! `InterruptHandle` once the limit has passed, so every solver honors the same
//! limit without polling a clock in its hot loop.

use crossbeam_channel::RecvTimeoutError;
use std::time::Duration;
use wayfinder_search::interrupt::InterruptHandle;

/// How often the watchdog retries an interrupt that found no attached search.
const RETRY_INTERVAL: Duration = Duration::from_millis(1);

/// A wall-clock limit enforced through an `InterruptHandle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    limit: Duration,
}

impl Deadline {
    #[inline]
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Runs `run` and interrupts `handle` if it has not returned within the limit.
    ///
    /// `run` is expected to attach a search to `handle`. If the limit passes
    /// before it has, the watchdog keeps retrying until the search attaches or
    /// `run` returns.
    pub fn enforce<T, F>(&self, handle: &InterruptHandle, run: F) -> T
    where
        F: FnOnce() -> T,
    {
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let limit = self.limit;
        let watchdog = handle.clone();

        std::thread::scope(|scope| {
            scope.spawn(move || {
                if done_rx.recv_timeout(limit) != Err(RecvTimeoutError::Timeout) {
                    return;
                }
                log::debug!("time limit of {:?} reached, interrupting search", limit);
                while !watchdog.interrupt() {
                    if done_rx.recv_timeout(RETRY_INTERVAL) != Err(RecvTimeoutError::Timeout) {
                        return;
                    }
                }
            });

            let result = run();
            drop(done_tx);
            result
        })
    }
}
