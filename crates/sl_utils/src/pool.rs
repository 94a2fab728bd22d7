//! A small reuse pool for per-call scratch objects.
//!
//! ## Menu
//!
//! - [`Reusable`]: objects that can be reset to a clean state.
//! - [`Pool`]: a mutex-guarded stack of idle objects.
//! - [`Pooled`]: an exclusive handle; the object goes back to the pool on drop,
//!   including while unwinding.
//!
//! # Examples
//!
//! ```
//! use sl_utils::{Pool, Reusable};
//!
//! #[derive(Default)]
//! struct Scratch(Vec<u8>);
//!
//! impl Reusable for Scratch {
//!     fn reset(&mut self) {
//!         self.0.clear();
//!     }
//! }
//!
//! let pool: Pool<Scratch> = Pool::new(4);
//! {
//!     let mut scratch = pool.take();
//!     scratch.0.extend_from_slice(b"abc");
//! }
//! assert_eq!(pool.idle(), 1);
//! assert!(pool.take().0.is_empty());
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

// -----------------------------------------------------------------------------
// Reusable

/// An object that can be returned to a [`Pool`].
///
/// `reset` runs before the object is stored, so a taken object is always clean.
pub trait Reusable: Default {
    /// Clears per-use state.
    fn reset(&mut self);

    /// Returns `false` if the object grew too large to keep.
    ///
    /// Dropped objects are simply replaced by a fresh `Default` later.
    #[inline]
    fn keep(&self) -> bool {
        true
    }
}

// -----------------------------------------------------------------------------
// Pool

/// A stack of idle objects shared between threads.
///
/// At most `max_idle` objects are kept. The lock is only held for a push or pop.
pub struct Pool<T> {
    idle: Mutex<Vec<T>>,
    max_idle: usize,
}

impl<T: Reusable> Pool<T> {
    /// Creates an empty pool keeping at most `max_idle` objects.
    #[inline]
    pub const fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Checks out an idle object, or a new default one.
    pub fn take(&self) -> Pooled<'_, T> {
        let item = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();
        Pooled { pool: self, item }
    }

    /// Number of idle objects currently stored.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn release(&self, mut item: T) {
        if !item.keep() {
            return;
        }
        item.reset();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.max_idle {
            idle.push(item);
        }
    }
}

impl<T> Debug for Pool<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pool")
            .field("max_idle", &self.max_idle)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Pooled

/// Exclusive access to an object checked out of a [`Pool`].
pub struct Pooled<'a, T: Reusable> {
    pool: &'a Pool<T>,
    item: T,
}

impl<T: Reusable> Deref for Pooled<'_, T> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Reusable> DerefMut for Pooled<'_, T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Reusable> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        let item = core::mem::take(&mut self.item);
        self.pool.release(item);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Pool, Reusable};
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Stack(Vec<u32>);

    impl Reusable for Stack {
        fn reset(&mut self) {
            self.0.clear();
        }

        fn keep(&self) -> bool {
            self.0.capacity() <= 16
        }
    }

    #[test]
    fn released_objects_are_reset() {
        let pool: Pool<Stack> = Pool::new(2);
        pool.take().0.push(7);
        assert_eq!(pool.idle(), 1);
        let again = pool.take();
        assert!(again.0.is_empty());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn oversized_objects_are_dropped() {
        let pool: Pool<Stack> = Pool::new(2);
        pool.take().0.extend(0..1000);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn idle_count_is_bounded() {
        let pool: Pool<Stack> = Pool::new(1);
        let a = pool.take();
        let b = pool.take();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn release_happens_on_unwind() {
        let pool: Pool<Stack> = Pool::new(2);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = pool.take();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
    }
}
