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

//! # Cost Model
//!
//! The optional extension of the search-space contract that priority-ordered
//! solvers need: the cost of each move and an estimate of the cost remaining
//! from a state to the nearest goal.
//!
//! ## Motivation
//!
//! Depth-first and hybrid solvers return *a* solution. When the caller needs the
//! cheapest one, the solver has to order its frontier by accumulated cost plus a
//! remaining-cost estimate. Keeping that information in a separate trait leaves
//! the base contract untouched for puzzles that never need optimality.
//!
//! ## Highlights
//!
//! - `PathCost` collects the numeric bounds a cost type needs into one alias,
//!   implemented for every primitive integer.
//! - `estimate` must be admissible (never overestimate the true remaining cost)
//!   for the optimality guarantee to hold. The default estimate is zero, which
//!   turns A* into uniform-cost search.

use crate::space::SearchSpace;
use num_traits::{PrimInt, Zero};
use std::hash::Hash;

/// A trait alias for integer types usable as path costs.
///
/// These are usually the unsigned integer types; signed types work as long as
/// step costs are non-negative.
pub trait PathCost:
    PrimInt + Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

impl<T> PathCost for T where
    T: PrimInt + Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

/// Step costs and remaining-cost estimates for a [`SearchSpace`].
///
/// Priority-ordered search tracks the cheapest known cost per state and does
/// not call [`SearchSpace::already_seen`]: states are told apart by their own
/// `Eq` and `Hash`. A puzzle that canonicalises symmetric states in
/// `already_seen` should produce canonical states from `apply_move` (or
/// implement `Eq`/`Hash` up to symmetry) to get the same de-duplication here.
pub trait CostModel: SearchSpace {
    /// The numeric type costs are measured in.
    type Cost: PathCost;

    /// Returns the cost of playing `mv` in `state`. Must be non-negative.
    fn move_cost(&self, state: &Self::State, mv: &Self::Move) -> Self::Cost;

    /// Returns a lower bound on the cost from `state` to the nearest goal.
    #[inline]
    fn estimate(&self, _state: &Self::State) -> Self::Cost {
        Self::Cost::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::{CostModel, PathCost};
    use crate::space::SearchSpace;

    struct Line;

    impl SearchSpace for Line {
        type State = i32;
        type Move = i32;

        fn initial_state(&self) -> i32 {
            0
        }

        fn is_goal(&self, state: &i32) -> bool {
            *state == 3
        }

        fn legal_moves(&self, _state: &i32) -> Vec<i32> {
            vec![1, -1]
        }

        fn apply_move(&self, state: &i32, mv: &i32) -> i32 {
            state + mv
        }
    }

    impl CostModel for Line {
        type Cost = u16;

        fn move_cost(&self, _state: &i32, mv: &i32) -> u16 {
            if *mv > 0 { 2 } else { 1 }
        }
    }

    fn assert_path_cost<C: PathCost>() {}

    #[test]
    fn test_primitive_integers_are_path_costs() {
        assert_path_cost::<u8>();
        assert_path_cost::<u32>();
        assert_path_cost::<u64>();
        assert_path_cost::<i64>();
        assert_path_cost::<usize>();
    }

    #[test]
    fn test_default_estimate_is_zero() {
        let line = Line;
        assert_eq!(line.estimate(&0), 0);
        assert_eq!(line.estimate(&-5), 0);
        assert_eq!(line.move_cost(&0, &1), 2);
        assert_eq!(line.move_cost(&0, &-1), 1);
    }
}
