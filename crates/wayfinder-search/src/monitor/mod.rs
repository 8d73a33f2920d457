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

//! # Search Monitors
//!
//! Pluggable observers for the search lifecycle. A solver reports to exactly
//! one monitor; `composite` fans the events out to as many as needed. Monitors
//! are how progress reaches a UI or a log without entangling either with the
//! search loop.
//!
//! ## Submodules
//!
//! - `search_monitor`: Core trait (`SearchMonitor<S, M>`) and the `FinalReport`
//!   delivered once when `solve()` returns.
//! - `composite`: Aggregate multiple monitors into a single composite.
//! - `log`: Throttled progress lines through the `log` facade.
//! - `no_op`: Ignores every event.
//! - `recording`: Keeps counters and the final report for later inspection.
//!
//! ## Call discipline
//!
//! - `on_enter_search` once, before the first expansion.
//! - `on_refresh` opportunistically: the sequential solvers call it for each
//!   visited node, the concurrent solver only every few tries and only when no
//!   other worker is currently inside the monitor.
//! - `on_exit_search` exactly once, after the result is known.

pub mod composite;
pub mod log;
pub mod no_op;
pub mod recording;
pub mod search_monitor;
