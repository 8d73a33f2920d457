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

//! Sources of the uniform draws behind the depth/breadth decision.
//!
//! The solver asks its `CoinSource` for a value in `[0, 1)` for every child it
//! considers handing to the pool. Injecting the source keeps the solver free of
//! global random state and lets tests pin the decisions down.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// A shared source of uniform draws in `[0, 1)`.
pub trait CoinSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Seeded ChaCha8 stream shared by all workers.
///
/// The sequence of draws is reproducible, but which worker receives which
/// draw depends on scheduling.
#[derive(Debug)]
pub struct SeededCoin {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededCoin {
    pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for SeededCoin {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl CoinSource for SeededCoin {
    #[inline]
    fn draw(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random::<f64>()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCoin(pub f64);

impl CoinSource for ConstantCoin {
    #[inline(always)]
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values.
#[derive(Debug)]
pub struct SequenceCoin {
    values: Vec<f64>,
    next: AtomicUsize,
}

impl SequenceCoin {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(
            !values.is_empty(),
            "called `SequenceCoin::new` with no values"
        );
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }

    /// Returns how many values have been drawn so far.
    #[inline]
    pub fn draws(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

impl CoinSource for SequenceCoin {
    #[inline]
    fn draw(&self) -> f64 {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()]
    }
}

impl<C> CoinSource for std::sync::Arc<C>
where
    C: CoinSource + ?Sized,
{
    #[inline]
    fn draw(&self) -> f64 {
        (**self).draw()
    }
}
