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

use crate::monitor::search_monitor::{FinalReport, SearchMonitor};

/// A no-operation monitor that implements the `SearchMonitor` trait
/// but does nothing on any of the events.
#[repr(transparent)]
pub struct NoOperationMonitor<S, M> {
    _phantom: std::marker::PhantomData<fn() -> (S, M)>,
}

impl<S, M> NoOperationMonitor<S, M> {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, M> Default for NoOperationMonitor<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> Clone for NoOperationMonitor<S, M> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S, M> std::fmt::Debug for NoOperationMonitor<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NoOperationMonitor")
    }
}

impl<S, M> SearchMonitor<S, M> for NoOperationMonitor<S, M> {
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _initial: &S) {}

    #[inline(always)]
    fn on_refresh(&mut self, _state: &S, _tries: u64) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _report: &FinalReport<'_, S, M>) {}
}
