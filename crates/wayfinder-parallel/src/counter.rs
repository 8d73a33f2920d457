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

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts tasks that have been created but have not finished running.
///
/// A task is registered before anyone else can see it and completed after it
/// has fully run. The completion that brings the count to zero is reported to
/// its caller exactly once per quiescent period; since only a live task can
/// register new ones, a zero count means the search has nothing left to do.
#[derive(Debug, Default)]
pub struct InFlightCounter {
    count: AtomicUsize,
}

impl InFlightCounter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn register(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    /// Marks `n` tasks as finished. Returns `true` if this brought the count to zero.
    ///
    /// # Panics
    ///
    /// Panics if more tasks are completed than were registered.
    #[inline]
    pub fn complete(&self, n: usize) -> bool {
        if n == 0 {
            return false;
        }
        let previous = self.count.fetch_sub(n, Ordering::AcqRel);
        assert!(
            previous >= n,
            "called `InFlightCounter::complete` with {} tasks but only {} in flight",
            n,
            previous
        );
        previous == n
    }

    #[inline]
    pub fn in_flight(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}
