//! Ledger Locking System
//!
//! A per-ledger mutual exclusion lock held for the whole duration of a
//! mutating operation. Ports are called synchronously and may call back into
//! the ledger; while the lock is held such re-entrant mutating calls fail with
//! `Locked` instead of observing a half-applied operation.
//!
//! ```plain
//! Lock State Machine:
//!
//!         ┌──────────┐
//!    ┌────► Unlocked │
//!    │    └──────────┘
//!    │         │
//! guard      try_lock
//! dropped      │
//!    │         ▼
//!    │    ┌─────────┐
//!    └────┤ Locked  │──── try_lock ──► Err(Locked)
//!         └─────────┘
//! ```

use std::cell::RefCell;

use crate::utils::error::{ExtenderError, ExtenderResult};

/// Runtime lock state
#[derive(Clone, Debug, Default)]
pub struct Lock {
    /// Current lock state
    pub is_locked: bool,
}

impl Lock {
    /// Attempts to acquire the lock.
    ///
    /// # Returns
    /// * `Ok(())` - Lock successfully acquired
    /// * `Err(ExtenderError::Locked)` - Lock unavailable
    pub fn try_lock(&mut self) -> ExtenderResult<()> {
        if self.is_locked {
            return Err(ExtenderError::Locked);
        }
        self.is_locked = true;
        Ok(())
    }

    /// Releases the lock if it was legitimately acquired.
    pub fn try_unlock(&mut self, acquired_lock: bool) -> &mut Self {
        if acquired_lock {
            self.is_locked = false;
        }
        self
    }
}

/// Holds the ledger lock until dropped, including during unwinding.
pub struct LockGuard<'a> {
    lock: &'a RefCell<Lock>,
    /// Tracks if the lock acquisition was successful for the drop trait implementation
    acquired_lock: bool,
}

impl<'a> LockGuard<'a> {
    /// Acquires `lock`, or passes through without locking when `enabled` is false.
    pub fn acquire(lock: &'a RefCell<Lock>, enabled: bool) -> ExtenderResult<Self> {
        if enabled {
            lock.borrow_mut().try_lock()?;
        }
        Ok(Self {
            lock,
            acquired_lock: enabled,
        })
    }
}

impl Drop for LockGuard<'_> {
    /// Unlocks the ledger when the guard goes out of scope
    fn drop(&mut self) {
        self.lock.borrow_mut().try_unlock(self.acquired_lock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_lock_twice() {
        let mut lock = Lock::default();
        assert!(lock.try_lock().is_ok());
        assert_eq!(lock.try_lock(), Err(ExtenderError::Locked));
    }

    #[test]
    fn test_unlock_requires_acquisition() {
        let mut lock = Lock::default();
        lock.try_lock().unwrap();

        lock.try_unlock(false);
        assert!(lock.is_locked);

        lock.try_unlock(true);
        assert!(!lock.is_locked);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = RefCell::new(Lock::default());
        {
            let _guard = LockGuard::acquire(&lock, true).unwrap();
            assert!(lock.borrow().is_locked);
            assert!(matches!(
                LockGuard::acquire(&lock, true),
                Err(ExtenderError::Locked)
            ));
        }
        assert!(!lock.borrow().is_locked);
    }

    #[test]
    fn test_failed_guard_does_not_release_holder() {
        let lock = RefCell::new(Lock::default());
        let _guard = LockGuard::acquire(&lock, true).unwrap();
        let _ = LockGuard::acquire(&lock, true);
        assert!(lock.borrow().is_locked);
    }

    #[test]
    fn test_disabled_guard_never_locks() {
        let lock = RefCell::new(Lock::default());
        let _outer = LockGuard::acquire(&lock, false).unwrap();
        let _inner = LockGuard::acquire(&lock, false).unwrap();
        assert!(!lock.borrow().is_locked);
    }

    #[test]
    fn test_guard_releases_on_unwind() {
        let lock = RefCell::new(Lock::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = LockGuard::acquire(&lock, true).unwrap();
            panic!("treasury rejected the deposit");
        }));
        assert!(result.is_err());
        assert!(!lock.borrow().is_locked);
    }
}
