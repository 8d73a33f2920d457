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

//! # Path Nodes
//!
//! An immutable, parent-linked record of how a state was reached. Every node
//! stores the state, the move that produced it (absent at the root) and a
//! reference-counted pointer to its parent.
//!
//! ## Motivation
//!
//! Search branches share prefixes: all children of a node point at the same
//! parent, and branches explored concurrently by different workers share the
//! whole path back to the root. Reference counting keeps an ancestor alive
//! exactly as long as some descendant (or the published solution) needs it, and
//! frees abandoned branches as soon as the last task holding them finishes.
//!
//! ## Highlights
//!
//! - `PathNode::root(state)` and `PathNode::child(&parent, mv, state)` return `Arc`s.
//! - `move_list()` walks the parent chain to the root and reverses it; the cost is
//!   proportional to the depth and the node is never mutated, so it can be called
//!   any number of times.
//! - Dropping a deep chain unlinks ancestors iteratively instead of recursing once
//!   per level, so very long paths cannot overflow the stack on release.
//!
//! ## Usage
//!
//! ```rust
//! use wayfinder_model::path::PathNode;
//!
//! let root = PathNode::root(0u32);
//! let one = PathNode::child(&root, "inc", 1u32);
//! let two = PathNode::child(&one, "inc", 2u32);
//!
//! assert_eq!(two.depth(), 2);
//! assert_eq!(two.move_list(), vec!["inc", "inc"]);
//! ```

use crate::solution::Solution;
use std::sync::Arc;

/// A node of the explored search tree.
pub struct PathNode<S, M> {
    state: S,
    last_move: Option<M>,
    parent: Option<Arc<PathNode<S, M>>>,
    depth: usize,
}

impl<S, M> PathNode<S, M> {
    /// Creates the root node of a search.
    #[inline]
    pub fn root(state: S) -> Arc<Self> {
        Arc::new(Self {
            state,
            last_move: None,
            parent: None,
            depth: 0,
        })
    }

    /// Creates the node reached from `parent` by playing `mv`, arriving at `state`.
    #[inline]
    pub fn child(parent: &Arc<Self>, mv: M, state: S) -> Arc<Self> {
        Arc::new(Self {
            state,
            last_move: Some(mv),
            parent: Some(Arc::clone(parent)),
            depth: parent.depth + 1,
        })
    }

    /// Returns the state stored in this node.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns the move that produced this node, or `None` at the root.
    #[inline]
    pub fn last_move(&self) -> Option<&M> {
        self.last_move.as_ref()
    }

    /// Returns the parent node, or `None` at the root.
    #[inline]
    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Returns the number of moves between the root and this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if this node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns an iterator from this node up to (and including) the root.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'_, S, M> {
        Ancestors { next: Some(self) }
    }

    /// Reconstructs the ordered move sequence from the root to this node.
    pub fn move_list(&self) -> Vec<M>
    where
        M: Clone,
    {
        let mut moves = Vec::with_capacity(self.depth);
        moves.extend(self.ancestors().filter_map(|node| node.last_move.clone()));
        moves.reverse();
        moves
    }

    /// Builds the [`Solution`] ending in this node.
    #[inline]
    pub fn to_solution(&self) -> Solution<S, M>
    where
        S: Clone,
        M: Clone,
    {
        Solution::new(self.move_list(), self.state.clone())
    }
}

impl<S, M> Drop for PathNode<S, M> {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut inner) => next = inner.parent.take(),
                // Still shared: the remaining owner frees the rest of the chain.
                Err(_) => break,
            }
        }
    }
}

impl<S, M> std::fmt::Debug for PathNode<S, M>
where
    S: std::fmt::Debug,
    M: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathNode")
            .field("state", &self.state)
            .field("last_move", &self.last_move)
            .field("depth", &self.depth)
            .finish()
    }
}

/// Iterator over a node and its ancestors, created by [`PathNode::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a, S, M> {
    next: Option<&'a PathNode<S, M>>,
}

impl<'a, S, M> Iterator for Ancestors<'a, S, M> {
    type Item = &'a PathNode<S, M>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

impl<S, M> std::iter::FusedIterator for Ancestors<'_, S, M> {}

#[cfg(test)]
mod tests {
    use super::PathNode;
    use std::sync::Arc;

    #[test]
    fn test_root_has_no_move_and_zero_depth() {
        let root = PathNode::<u8, char>::root(7);
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(*root.state(), 7);
        assert!(root.last_move().is_none());
        assert!(root.parent().is_none());
        assert!(root.move_list().is_empty());
    }

    #[test]
    fn test_move_list_is_ordered_root_to_leaf() {
        let root = PathNode::root(0);
        let a = PathNode::child(&root, 'a', 1);
        let b = PathNode::child(&a, 'b', 2);
        let c = PathNode::child(&b, 'c', 3);

        assert_eq!(c.depth(), 3);
        assert_eq!(c.move_list(), vec!['a', 'b', 'c']);
        // Restartable: a second call yields the same sequence.
        assert_eq!(c.move_list(), vec!['a', 'b', 'c']);
        assert_eq!(c.last_move(), Some(&'c'));
        assert_eq!(*c.parent().unwrap().state(), 2);
    }

    #[test]
    fn test_ancestors_walks_up_to_root() {
        let root = PathNode::root("s0");
        let a = PathNode::child(&root, 1, "s1");
        let b = PathNode::child(&a, 2, "s2");

        let states = b.ancestors().map(|n| *n.state()).collect::<Vec<_>>();
        assert_eq!(states, vec!["s2", "s1", "s0"]);
    }

    #[test]
    fn test_siblings_share_their_parent() {
        let root = PathNode::root(0);
        let left = PathNode::child(&root, 'l', 1);
        let right = PathNode::child(&root, 'r', 2);

        assert!(Arc::ptr_eq(left.parent().unwrap(), right.parent().unwrap()));
        assert_eq!(Arc::strong_count(&root), 3);

        drop(left);
        assert_eq!(Arc::strong_count(&root), 2);
        assert_eq!(right.move_list(), vec!['r']);
    }

    #[test]
    fn test_ancestor_outlives_dropped_handles() {
        let leaf = {
            let root = PathNode::root(0);
            let mid = PathNode::child(&root, 'x', 1);
            PathNode::child(&mid, 'y', 2)
        };
        assert_eq!(leaf.move_list(), vec!['x', 'y']);
        assert_eq!(*leaf.ancestors().last().unwrap().state(), 0);
    }

    #[test]
    fn test_to_solution_carries_goal_state() {
        let root = PathNode::root(10);
        let leaf = PathNode::child(&root, "up", 11);
        let solution = leaf.to_solution();
        assert_eq!(solution.moves(), &["up"]);
        assert_eq!(*solution.goal(), 11);
    }

    #[test]
    fn test_dropping_a_very_deep_chain_does_not_overflow() {
        let mut node = PathNode::root(0u32);
        for i in 1..=500_000u32 {
            node = PathNode::child(&node, (), i);
        }
        assert_eq!(node.depth(), 500_000);
        drop(node);
    }

    #[test]
    fn test_dropping_shared_chain_keeps_other_branch_intact() {
        let mut node = PathNode::root(0u32);
        for i in 1..=1_000u32 {
            node = PathNode::child(&node, i, i);
        }
        let branch = PathNode::child(&node, 9_999, 9_999);
        drop(node);
        assert_eq!(branch.depth(), 1_001);
        assert_eq!(branch.move_list().len(), 1_001);
        assert_eq!(branch.move_list()[0], 1);
    }
}
