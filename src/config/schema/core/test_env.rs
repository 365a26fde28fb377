use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Serializes env-var access for the duration of a test and restores every
/// touched variable on drop.
pub(super) struct EnvScope {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub(super) fn new() -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    /// Clear every `POSTCRAFT_*` override so a test starts from file values.
    pub(super) fn cleared() -> Self {
        let mut scope = Self::new();
        for key in super::env_overrides::ENV_KEYS {
            scope.unset(key);
        }
        scope
    }

    pub(super) fn set(&mut self, key: &'static str, value: &str) {
        self.remember(key);
        // SAFETY: test-only; ENV_LOCK is held for the lifetime of the scope.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub(super) fn unset(&mut self, key: &'static str) {
        self.remember(key);
        // SAFETY: test-only; ENV_LOCK is held for the lifetime of the scope.
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn remember(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, std::env::var(key).ok()));
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            // SAFETY: test-only restoration while ENV_LOCK is still held.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
