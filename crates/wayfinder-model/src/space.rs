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

//! # Search Space Contract
//!
//! The narrow interface a puzzle implements so that any wayfinder solver can
//! search it. The contract has no behaviour of its own; it describes an implicit
//! directed graph whose vertices are states and whose edges are moves.
//!
//! ## Contract
//!
//! - `initial_state()` is the root of every search.
//! - `legal_moves(state)` enumerates outgoing edges. The order is significant for
//!   the depth-first solver, which visits children in exactly this order.
//! - `apply_move(state, mv)` produces the successor. It is only ever called with a
//!   move that `legal_moves` returned for the same state.
//! - `already_seen(state, visited)` is an atomic check-and-insert and the sole
//!   de-duplication mechanism. It returns `true` if the state had been seen before,
//!   otherwise it records the state and returns `false`.
//!
//! ## Usage
//!
//! ```rust
//! use wayfinder_model::space::SearchSpace;
//!
//! struct Counter { target: u32 }
//!
//! impl SearchSpace for Counter {
//!     type State = u32;
//!     type Move = u32;
//!
//!     fn initial_state(&self) -> u32 { 0 }
//!     fn is_goal(&self, state: &u32) -> bool { *state == self.target }
//!     fn legal_moves(&self, state: &u32) -> Vec<u32> {
//!         if *state < self.target { vec![1, 2] } else { Vec::new() }
//!     }
//!     fn apply_move(&self, state: &u32, mv: &u32) -> u32 { state + mv }
//! }
//! ```

use crate::visited::VisitedSet;
use std::hash::Hash;

/// The state/move graph a puzzle exposes to the solvers.
///
/// Solvers that fan work out across threads additionally require the space,
/// its states and its moves to be `Send + Sync`; see [`ConcurrentSearchSpace`].
pub trait SearchSpace {
    /// A complete configuration snapshot of the puzzle.
    type State: Clone + Eq + Hash;
    /// A transition descriptor between two states.
    type Move: Clone;

    /// Returns the configuration the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Returns `true` if `state` satisfies the puzzle.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Returns the moves applicable in `state`, in the order they should be tried.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Returns the state reached by applying `mv` to `state`.
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Atomically checks whether `state` has been seen and records it if not.
    ///
    /// Returns `true` if the state was already present. Puzzles with symmetric
    /// configurations may override this to canonicalise before inserting.
    #[inline]
    fn already_seen(&self, state: &Self::State, visited: &VisitedSet<Self::State>) -> bool {
        !visited.insert(state.clone())
    }
}

/// A `SearchSpace` whose states and moves can be shared across worker threads.
///
/// Blanket implemented for every space that satisfies the bounds.
pub trait ConcurrentSearchSpace:
    SearchSpace<State: Send + Sync, Move: Send + Sync> + Sync
{
}

impl<S> ConcurrentSearchSpace for S where
    S: SearchSpace<State: Send + Sync, Move: Send + Sync> + Sync
{
}
