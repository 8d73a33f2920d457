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

//! # One-Shot Value Latch
//!
//! A blocking, settable slot that publishes the first result of a search to
//! whoever is waiting for it. The concurrent solver parks the calling thread
//! on the latch while its workers race to either find a goal or exhaust the
//! search space; whichever happens first is published and everything after is
//! ignored.
//!
//! ## Motivation
//!
//! - First writer wins: many worker threads may reach a goal at nearly the same
//!   time. Exactly one of them publishes; the others are silently ignored.
//! - No busy waiting: readers sleep on a `Condvar` until a value is published
//!   or they are interrupted.
//! - Cheap polling: `is_set()` is a single atomic load, so every task can check
//!   it at its start without touching the mutex.
//!
//! ## Highlights
//!
//! - `set_value(v) -> bool` decides the winner with a compare-and-swap on an
//!   `AtomicBool`, then stores the value under the mutex and wakes all readers.
//! - `get_value()` blocks until published and returns a clone of the value.
//! - `interrupt()` wakes blocked readers with `LatchError::Interrupted` without
//!   touching the (possibly still unset) value; the latch can still be set later.
//!
//! ## Usage
//!
//! ```rust
//! use wayfinder_search::latch::ValueLatch;
//! use std::sync::Arc;
//!
//! let latch = Arc::new(ValueLatch::new());
//! let writer = Arc::clone(&latch);
//! std::thread::spawn(move || {
//!     writer.set_value(7u32);
//!     writer.set_value(8u32); // ignored
//! });
//!
//! assert_eq!(latch.get_value(), Ok(7));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Why a blocking read on a [`ValueLatch`] returned without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LatchError {
    /// The wait was interrupted from another thread before a value was published.
    #[error("wait on the result latch was interrupted")]
    Interrupted,
    /// The wait timed out before a value was published.
    #[error("timed out waiting for the result latch")]
    TimedOut,
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    interrupted: bool,
}

/// A one-shot, first-writer-wins, blocking result slot.
#[derive(Debug)]
pub struct ValueLatch<T> {
    /// Set by the winning writer before the value is stored.
    ///
    /// `is_set` may therefore observe `true` a moment before the value becomes
    /// readable; blocking readers wait on the slot itself and never observe that gap.
    claimed: AtomicBool,
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T> Default for ValueLatch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueLatch<T> {
    /// Creates a new, unset latch.
    #[inline]
    pub fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
            slot: Mutex::new(Slot {
                value: None,
                interrupted: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Publishes `value` if nothing has been published yet.
    ///
    /// Returns `true` if this call published the value. Later calls are ignored.
    pub fn set_value(&self, value: T) -> bool {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let mut slot = self.lock();
        slot.value = Some(value);
        drop(slot);
        self.ready.notify_all();
        true
    }

    /// Returns `true` if a value has been published (non-blocking).
    #[inline]
    pub fn is_set(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }

    /// Returns `true` if `interrupt` has been called on this latch.
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.lock().interrupted
    }

    /// Wakes every blocked reader with [`LatchError::Interrupted`].
    ///
    /// A value that is already published is unaffected and still returned by
    /// readers. Subsequent reads on an unset latch fail immediately until a value
    /// is published.
    pub fn interrupt(&self) {
        let mut slot = self.lock();
        slot.interrupted = true;
        drop(slot);
        self.ready.notify_all();
    }

    /// Returns a clone of the published value, if any, without blocking.
    #[inline]
    pub fn try_get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().value.clone()
    }

    /// Blocks until a value is published and returns a clone of it.
    pub fn get_value(&self) -> Result<T, LatchError>
    where
        T: Clone,
    {
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.as_ref() {
                return Ok(value.clone());
            }
            if slot.interrupted {
                return Err(LatchError::Interrupted);
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Returns the published value, waiting out a writer that has claimed the
    /// latch but not stored its value yet. Interruption is ignored.
    ///
    /// Returns `None` without blocking if no writer has claimed the latch.
    pub fn wait_published(&self) -> Option<T>
    where
        T: Clone,
    {
        if !self.is_set() {
            return None;
        }
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.as_ref() {
                return Some(value.clone());
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`get_value`](Self::get_value), but gives up after `timeout`.
    pub fn get_value_timeout(&self, timeout: Duration) -> Result<T, LatchError>
    where
        T: Clone,
    {
        let deadline = Instant::now() + timeout;
        let mut slot = self.lock();
        loop {
            if let Some(value) = slot.value.as_ref() {
                return Ok(value.clone());
            }
            if slot.interrupted {
                return Err(LatchError::Interrupted);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(LatchError::TimedOut);
            }
            slot = self
                .ready
                .wait_timeout(slot, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // A panicking writer cannot leave the slot half-updated, so poisoning is ignored.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
