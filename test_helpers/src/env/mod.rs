//! Serialised access to process environment variables.
//!
//! Environment variables are process-wide, while tests run on parallel
//! threads. Every mutation made through this module happens under a global
//! re-entrant lock, and every mutation returns a [`VarGuard`] that restores
//! the previous value when dropped.
//!
//! Reading the environment is not guarded by the standard library, so a test
//! that both sets variables and later reads them (for example by parsing
//! flags with an environment fallback) should hold an [`EnvLock`] for its
//! whole body.
//!
//! # Examples
//!
//! ```
//! use flagarize_test_helpers::env;
//!
//! let lock = env::lock();
//! let _port = lock.set("FLAGARIZE_DOC_PORT", "8080");
//! assert_eq!(std::env::var("FLAGARIZE_DOC_PORT").as_deref(), Ok("8080"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Exclusive access to the process environment.
///
/// The lock is re-entrant, so guards created while it is held may still be
/// dropped on the same thread.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

/// Restores an environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct VarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for VarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl EnvLock {
    /// Sets `key` to `value` until the returned guard is dropped.
    pub fn set(&self, key: impl Into<String>, value: impl AsRef<OsStr>) -> VarGuard {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: `self` holds the environment lock.
        unsafe { env::set_var(&key, value) };
        VarGuard { key, original }
    }

    /// Removes `key` until the returned guard is dropped.
    pub fn unset(&self, key: impl Into<String>) -> VarGuard {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: `self` holds the environment lock.
        unsafe { env::remove_var(&key) };
        VarGuard { key, original }
    }
}

impl Drop for VarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        match self.original.take() {
            // SAFETY: the environment lock is held for the restoration.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: as above.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Acquires the environment lock until the returned value is dropped.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_LOCK.lock(),
    }
}

/// Sets `key` to `value` until the returned guard is dropped.
///
/// The lock is only held while the variable changes. Use [`lock`] when the
/// test reads the variable back through other code.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> VarGuard {
    lock().set(key, value)
}

/// Removes `key` until the returned guard is dropped.
pub fn remove_var(key: impl Into<String>) -> VarGuard {
    lock().unset(key)
}

/// Runs `f` with the given variables applied, holding the lock throughout.
///
/// A `None` value removes the variable for the duration of the call.
///
/// # Examples
///
/// ```
/// use flagarize_test_helpers::env;
///
/// let seen = env::with_vars(&[("FLAGARIZE_DOC_LEVEL", Some("debug"))], || {
///     std::env::var("FLAGARIZE_DOC_LEVEL").ok()
/// });
/// assert_eq!(seen.as_deref(), Some("debug"));
/// assert!(std::env::var("FLAGARIZE_DOC_LEVEL").is_err());
/// ```
pub fn with_vars<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let lock = lock();
    let guards: Vec<VarGuard> = vars
        .iter()
        .map(|&(key, value)| match value {
            Some(value) => lock.set(key, value),
            None => lock.unset(key),
        })
        .collect();
    let result = f();
    // Restore in reverse so repeated keys unwind to the original value.
    for guard in guards.into_iter().rev() {
        drop(guard);
    }
    result
}

#[cfg(test)]
mod tests;
