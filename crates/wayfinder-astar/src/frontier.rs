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

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<C, N> {
    f: C,
    g: C,
    sequence: u64,
    node: N,
}

impl<C, N> PartialEq for Entry<C, N>
where
    C: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C, N> Eq for Entry<C, N> where C: Ord {}

impl<C, N> PartialOrd for Entry<C, N>
where
    C: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C, N> Ord for Entry<C, N>
where
    C: Ord,
{
    /// `BinaryHeap` is a max-heap, so "greater" means "popped first":
    /// lower `f`, then higher `g`, then earlier insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Open list of the A* search, ordered by `f = g + h`.
///
/// Ties on `f` go to the deeper entry (higher `g`), which tends to reach a
/// goal sooner; remaining ties are broken first-in, first-out so runs are
/// deterministic.
pub struct Frontier<C, N> {
    heap: BinaryHeap<Entry<C, N>>,
    sequence: u64,
}

impl<C, N> Default for Frontier<C, N>
where
    C: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, N> Frontier<C, N>
where
    C: Ord,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }

    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            sequence: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, f: C, g: C, node: N) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.heap.push(Entry {
            f,
            g,
            sequence,
            node,
        });
    }

    /// Removes the most promising entry and returns its `g` and node.
    #[inline]
    pub fn pop(&mut self) -> Option<(C, N)> {
        self.heap.pop().map(|entry| (entry.g, entry.node))
    }

    #[inline]
    pub fn peek_f(&self) -> Option<&C> {
        self.heap.peek().map(|entry| &entry.f)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<C, N> std::fmt::Debug for Frontier<C, N>
where
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("len", &self.heap.len())
            .field("pushed", &self.sequence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Frontier;

    #[test]
    fn test_pops_lowest_f_first() {
        let mut frontier = Frontier::new();
        frontier.push(5u32, 0, 'a');
        frontier.push(2, 0, 'b');
        frontier.push(9, 0, 'c');
        assert_eq!(frontier.peek_f(), Some(&2));
        let order: Vec<char> = std::iter::from_fn(|| frontier.pop().map(|(_, n)| n)).collect();
        assert_eq!(order, vec!['b', 'a', 'c']);
    }

    #[test]
    fn test_ties_prefer_higher_g_then_insertion_order() {
        let mut frontier = Frontier::preallocated(4);
        frontier.push(4u32, 1, 'a');
        frontier.push(4, 3, 'b');
        frontier.push(4, 1, 'c');
        frontier.push(4, 3, 'd');
        assert_eq!(frontier.len(), 4);

        let order: Vec<(u32, char)> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, vec![(3, 'b'), (3, 'd'), (1, 'a'), (1, 'c')]);
        assert!(frontier.is_empty());
    }
}
