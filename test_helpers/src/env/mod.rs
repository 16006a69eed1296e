//! Environment variable guards for tests.
//!
//! Every mutation takes a process-wide re-entrant lock and returns a guard
//! that puts the previous value back (or removes the variable) when dropped.
//! Guards for the same key restore in LIFO order. Hold [`lock`] when a test
//! needs several variables changed without other tests interleaving; the
//! guards created through it reuse the held lock.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _who = env::set_var("HELLO_WORLD_WHO", "Universe");
//! assert_eq!(std::env::var("HELLO_WORLD_WHO").ok().as_deref(), Some("Universe"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Guard restoring one environment variable on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock until dropped.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvLock {
    /// Sets `key` while the lock is held.
    pub fn set_var(&self, key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
        set_var(key, value)
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var(&self, key: impl Into<String>) -> EnvVarGuard {
        remove_var(key)
    }
}

fn mutate(key: String, apply: impl FnOnce(&str)) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    apply(&key);
    EnvVarGuard { key, original }
}

/// Sets `key` to `value`, returning a guard restoring the prior state.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    // SAFETY: `mutate` holds `ENV_MUTEX` around the call.
    mutate(key.into(), |key| unsafe { env::set_var(key, value.as_ref()) })
}

/// Removes `key`, returning a guard restoring the prior state.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    // SAFETY: `mutate` holds `ENV_MUTEX` around the call.
    mutate(key.into(), |key| unsafe { env::remove_var(key) })
}

/// Takes the environment lock for the lifetime of the returned value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let lock = env::lock();
/// let _a = lock.set_var("APP_ONE", "1");
/// let _b = lock.remove_var("APP_TWO");
/// ```
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}
