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

//! # Interrupt Handle
//!
//! External cancellation for a blocked `solve()` call. A caller obtains a
//! cloneable `InterruptHandle` from a solver before starting the search and
//! may call `interrupt()` from any thread. The solver attaches the latch of
//! the run in progress to the handle; interrupting wakes the blocked caller,
//! which then reports the run as interrupted instead of waiting forever.
//!
//! The solver detaches its latch when the run ends, so interrupting between
//! runs is a no-op that returns `false`.

use crate::latch::ValueLatch;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Something a blocked search can be woken from.
pub trait Interruptible: Send + Sync {
    fn interrupt(&self);
}

impl<T> Interruptible for ValueLatch<T>
where
    T: Send,
{
    #[inline]
    fn interrupt(&self) {
        ValueLatch::interrupt(self);
    }
}

/// A raised-once flag for solvers that poll for interruption instead of
/// blocking on a latch.
#[derive(Debug, Default)]
pub struct StopFlag {
    raised: AtomicBool,
}

impl StopFlag {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
    }
}

impl Interruptible for StopFlag {
    #[inline]
    fn interrupt(&self) {
        self.raise();
    }
}

type Target = Option<Weak<dyn Interruptible>>;

/// A cloneable handle that interrupts whatever search is currently attached to it.
#[derive(Clone, Default)]
pub struct InterruptHandle {
    target: Arc<Mutex<Target>>,
}

impl std::fmt::Debug for InterruptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterruptHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl InterruptHandle {
    /// Creates a handle with nothing attached.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interrupts the attached search, if any.
    ///
    /// Returns `true` if a live search was attached and has been interrupted.
    pub fn interrupt(&self) -> bool {
        let target = self.lock().as_ref().and_then(Weak::upgrade);
        match target {
            Some(target) => {
                target.interrupt();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a live search is attached.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|target| target.strong_count() > 0)
    }

    /// Attaches `target` until the returned guard is dropped.
    pub fn attach(&self, target: Weak<dyn Interruptible>) -> AttachGuard<'_> {
        *self.lock() = Some(target);
        AttachGuard { handle: self }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Target> {
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Detaches the search from its [`InterruptHandle`] when dropped.
#[derive(Debug)]
pub struct AttachGuard<'a> {
    handle: &'a InterruptHandle,
}

impl Drop for AttachGuard<'_> {
    fn drop(&mut self) {
        *self.handle.lock() = None;
    }
}
