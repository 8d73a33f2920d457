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

use std::sync::Arc;
use wayfinder_model::path::PathNode;

/// A move that has been generated but not yet applied.
///
/// Applying lazily at pop time keeps the frontier to one parent pointer and
/// one move per entry, and makes `apply_move` run in the same order a
/// recursive search would run it.
#[derive(Debug)]
pub struct Pending<S, M> {
    pub parent: Arc<PathNode<S, M>>,
    pub mv: M,
}

/// A LIFO stack of pending moves for depth-first search.
///
/// Children of a node are pushed in reverse so that the first legal move is
/// popped first, which reproduces the visitation order of the recursive
/// formulation without its recursion depth.
#[derive(Debug)]
pub struct SearchStack<S, M> {
    entries: Vec<Pending<S, M>>,
}

impl<S, M> Default for SearchStack<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> SearchStack<S, M> {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a `SearchStack` that can hold `capacity` pending moves
    /// before reallocating.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Pushes the moves of `parent` so that `moves[0]` is popped next.
    #[inline]
    pub fn push_children(&mut self, parent: &Arc<PathNode<S, M>>, moves: Vec<M>) {
        self.entries.reserve(moves.len());
        self.entries
            .extend(moves.into_iter().rev().map(|mv| Pending {
                parent: Arc::clone(parent),
                mv,
            }));
    }

    /// Pops the next pending move (LIFO).
    #[inline]
    pub fn pop(&mut self) -> Option<Pending<S, M>> {
        self.entries.pop()
    }
}
