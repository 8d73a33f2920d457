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

//! Wayfinder-Search: infrastructure shared by every wayfinder solver
//!
//! Nothing in here searches. The crate holds the pieces the solver crates
//! have in common so that a caller can swap one solver for another without
//! changing how results and progress reach it.
//!
//! Module map
//! - `latch`: one-shot, first-writer-wins result slot with blocking reads.
//! - `interrupt`: handle for waking a blocked solve from another thread.
//! - `monitor`: progress observers and the final report.
//! - `result`: outcome of a run with its termination reason.
//! - `stats`: counters and timing collected during a run.
//! - `solver`: the `Solver` trait implemented by every strategy.

pub mod interrupt;
pub mod latch;
pub mod monitor;
pub mod result;
pub mod solver;
pub mod stats;
