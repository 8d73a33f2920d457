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

//! Wayfinder-Parallel: concurrent hybrid depth/breadth-first search
//!
//! A fixed pool of worker threads expands path nodes drawn from a bounded
//! queue. Each expansion either continues a child on the same worker or hands
//! it to the pool, steered by a single probability. Visited states are shared
//! through a concurrent set; the first goal published to the result latch wins,
//! and an in-flight task counter publishes "exhausted" when the last task ends.
//!
//! Module map
//! - `solver`: the `ConcurrentSolver` and its per-run session.
//! - `config`: validated configuration and its builder.
//! - `coin`: injectable sources of the depth/breadth draws.
//! - `counter`: the in-flight task counter.
//! - `pool`: the bounded, scoped worker pool.

pub mod coin;
pub mod config;
pub mod counter;
pub mod pool;
pub mod solver;
