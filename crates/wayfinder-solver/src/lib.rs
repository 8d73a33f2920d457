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

//! Wayfinder: a generic puzzle search engine
//!
//! A puzzle describes itself through `SearchSpace` (initial state, goal test,
//! legal moves, move application); the engine finds a move sequence from the
//! initial state to a goal. Three search strategies share that contract:
//!
//! - `SolverKind::DepthFirst`: single-threaded depth-first search.
//! - `SolverKind::Concurrent`: a worker pool that mixes depth-first
//!   continuation with breadth-first fan-out, tuned by the depth/breadth factor.
//! - `SolverKind::AStar`: cheapest-first search. For spaces with a `CostModel`
//!   it returns a cheapest solution; for plain spaces every move costs one,
//!   which yields a shortest solution.
//!
//! `SolverBuilder` configures and builds an `Engine` for any of them,
//! optionally bounded by a wall-clock time limit.
//!
//! The crates the engine is assembled from are re-exported under short names.

pub mod deadline;
pub mod engine;
pub mod kind;

pub use engine::{Engine, SolverBuilder, UnitCost};
pub use kind::{SolverKind, UnknownSolverKind};

pub use wayfinder_astar as astar;
pub use wayfinder_dfs as dfs;
pub use wayfinder_model as model;
pub use wayfinder_parallel as parallel;
pub use wayfinder_search as search;
