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

//! # Visited Set
//!
//! The shared de-duplication structure of a single `solve()` run. Every
//! solver creates a fresh set per run and discards it afterwards.
//!
//! ## Motivation
//!
//! The concurrent solver expands states on many worker threads at once. Each
//! reachable state must be expanded at most once across the whole search, so the
//! "have we seen this?" question and the "remember it" side effect must happen as
//! one atomic step. A sharded concurrent set (`DashSet`) provides exactly that
//! without a global lock, and behaves like an ordinary hash set for the
//! single-threaded solvers.
//!
//! ## Highlights
//!
//! - `insert(state) -> bool` is the atomic check-and-insert; `true` means the state is new.
//! - Hashing uses `FxBuildHasher`, which is fast for the small integer-heavy
//!   states puzzles typically use.
//! - The set only ever grows during a run. An interrupted search leaves it
//!   consistent (every element is a state that was actually reached).

use dashmap::DashSet;
use rustc_hash::FxBuildHasher;
use std::hash::Hash;

/// A concurrent set of previously expanded states.
pub struct VisitedSet<S>
where
    S: Eq + Hash,
{
    states: DashSet<S, FxBuildHasher>,
}

impl<S> Default for VisitedSet<S>
where
    S: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for VisitedSet<S>
where
    S: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitedSet")
            .field("len", &self.len())
            .finish()
    }
}

impl<S> VisitedSet<S>
where
    S: Eq + Hash,
{
    /// Creates an empty visited set.
    #[inline]
    pub fn new() -> Self {
        Self {
            states: DashSet::with_hasher(FxBuildHasher),
        }
    }

    /// Creates an empty visited set with room for at least `capacity` states.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: DashSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Inserts `state` if it is not yet present.
    ///
    /// Returns `true` if the state was newly inserted, `false` if it was already
    /// present. The check and the insertion are a single atomic step with respect
    /// to other callers.
    #[inline]
    pub fn insert(&self, state: S) -> bool {
        self.states.insert(state)
    }

    /// Returns `true` if `state` has been recorded.
    #[inline]
    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Returns the number of recorded states.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no state has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::VisitedSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_insert_reports_new_states_once() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());

        assert!(visited.insert(3u64));
        assert!(!visited.insert(3u64));
        assert!(visited.insert(4u64));

        assert!(visited.contains(&3));
        assert!(!visited.contains(&5));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let visited: VisitedSet<Vec<u8>> = VisitedSet::with_capacity(128);
        assert!(visited.is_empty());
        assert!(visited.insert(vec![1, 2, 3]));
        assert!(visited.contains(&vec![1, 2, 3]));
    }

    #[test]
    fn test_concurrent_inserts_admit_each_state_exactly_once() {
        let visited = Arc::new(VisitedSet::new());
        let admitted = Arc::new(AtomicUsize::new(0));

        let handles = (0..8)
            .map(|_| {
                let visited = Arc::clone(&visited);
                let admitted = Arc::clone(&admitted);
                thread::spawn(move || {
                    for state in 0..1_000u32 {
                        if visited.insert(state) {
                            admitted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(admitted.load(Ordering::Relaxed), 1_000);
        assert_eq!(visited.len(), 1_000);
    }
}
