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

//! # Wayfinder Model
//!
//! **The contract between puzzles and the wayfinder search engines.**
//!
//! A puzzle never talks to a solver directly. It implements [`space::SearchSpace`]
//! (initial state, goal test, legal moves, transition, de-duplication) and the
//! solvers explore the implicit graph that contract describes.
//!
//! ## Architecture
//!
//! * **`space`**: The `SearchSpace` trait puzzles implement.
//! * **`cost`**: `CostModel`, the optional extension that priority-ordered solvers need
//!   (step costs plus an admissible remaining-cost estimate).
//! * **`visited`**: `VisitedSet`, the shared de-duplication structure that backs
//!   `SearchSpace::already_seen` and tolerates concurrent check-and-insert.
//! * **`path`**: `PathNode`, an immutable parent-linked record of how a state was
//!   reached. Many nodes share ancestors; the winning node reconstructs the move list.
//! * **`solution`**: The output format, an ordered move list plus the reached goal state.
//! * **`fixtures`** (feature `fixtures`): Tiny puzzles used across the workspace tests.
//!
//! ## Design Philosophy
//!
//! 1.  **Opaque states**: The engine only needs `Clone + Eq + Hash` on states and `Clone` on moves.
//! 2.  **Shared ancestry**: Path nodes are reference counted, so branches explored by
//!     different worker threads can share a common prefix without copying it.
//! 3.  **No validation**: A puzzle that violates its own contract is not defended against.

pub mod cost;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod path;
pub mod solution;
pub mod space;
pub mod visited;
