//! Single-initialization holder for validated settings.
//!
//! Responsibilities:
//! - Build settings at most once and share them as `Arc<Settings>`.
//! - Serve the process-wide instance behind [`get_settings`].
//!
//! Invariants:
//! - Only a successfully validated value is ever stored; a failed load leaves the cell empty.
//! - Concurrent first callers are serialized by the lock, so the loader runs once.
//! - Once stored, the same `Arc` is returned until [`SettingsCell::reset`].

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::loader::{ConfigError, ConfigLoader};
use crate::types::Settings;

static SETTINGS: SettingsCell = SettingsCell::new();

/// A lock-protected, lazily filled slot for [`Settings`].
///
/// Construct one per application (or per test) and pass it where settings are
/// needed, or use the process-wide instance through [`get_settings`].
#[derive(Debug, Default)]
pub struct SettingsCell {
    slot: Mutex<Option<Arc<Settings>>>,
}

impl SettingsCell {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    // The slot is only ever replaced wholesale, so a poisoned lock still holds a valid value.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<Settings>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The cached settings, if loaded.
    pub fn get(&self) -> Option<Arc<Settings>> {
        self.lock().clone()
    }

    /// Return the cached settings or build them with `init`.
    ///
    /// # Errors
    ///
    /// Returns whatever `init` returns; nothing is cached in that case and
    /// the next call runs `init` again.
    pub fn get_or_try_init<F>(&self, init: F) -> Result<Arc<Settings>, ConfigError>
    where
        F: FnOnce() -> Result<Settings, ConfigError>,
    {
        let mut slot = self.lock();
        if let Some(settings) = slot.as_ref() {
            debug!("using cached settings");
            return Ok(Arc::clone(settings));
        }

        let settings = Arc::new(init()?);
        *slot = Some(Arc::clone(&settings));
        info!("settings loaded and cached");
        Ok(settings)
    }

    /// Return the cached settings or load and validate them with `loader`.
    pub fn get_or_load(&self, loader: &ConfigLoader) -> Result<Arc<Settings>, ConfigError> {
        self.get_or_try_init(|| loader.load_and_validate())
    }

    /// Drop the cached settings so the next access loads again.
    pub fn reset(&self) {
        self.lock().take();
    }
}

/// Return the process-wide settings, loading them on first use.
///
/// The first call reads the process environment layered over the default
/// `.env` override files and validates the required keys. A failure is
/// returned to the caller and not cached, so a later call retries.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] listing every missing or blank key.
pub fn get_settings() -> Result<Arc<Settings>, ConfigError> {
    SETTINGS.get_or_try_init(|| ConfigLoader::from_process_env().load_and_validate())
}

/// Clear the process-wide settings (primarily for testing).
pub fn reset_settings() {
    SETTINGS.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{EnvSource, MapSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts lookups so tests can tell whether it was re-read.
    struct CountingSource {
        inner: MapSource,
        reads: Arc<AtomicUsize>,
    }

    impl EnvSource for CountingSource {
        fn get(&self, key: &str) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key)
        }
    }

    fn full_source() -> MapSource {
        MapSource::from_iter([
            ("GEMINI_API_KEY", "abc"),
            ("GITHUB_TOKEN", "def"),
            ("STUDENT_SECRET", "ghi"),
            ("GITHUB_USERNAME", "bob"),
        ])
    }

    fn counting_loader(inner: MapSource) -> (ConfigLoader, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let loader = ConfigLoader::new().with_source(CountingSource {
            inner,
            reads: Arc::clone(&reads),
        });
        (loader, reads)
    }

    #[test]
    fn test_second_call_returns_same_instance_without_reloading() {
        let cell = SettingsCell::new();
        let (loader, reads) = counting_loader(full_source());

        let first = cell.get_or_load(&loader).unwrap();
        let reads_after_first = reads.load(Ordering::SeqCst);
        let second = cell.get_or_load(&loader).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(reads.load(Ordering::SeqCst), reads_after_first);
        assert_eq!(second.github_username(), Some("bob"));
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cell = SettingsCell::new();
        let broken = ConfigLoader::new().with_source(full_source().with_var("GITHUB_TOKEN", " "));

        let err = cell.get_or_load(&broken).unwrap_err();
        assert_eq!(err.missing_keys(), ["GITHUB_TOKEN"]);
        assert!(cell.get().is_none());

        let fixed = ConfigLoader::new().with_source(full_source());
        let settings = cell.get_or_load(&fixed).unwrap();
        assert_eq!(settings.github_username(), Some("bob"));
        assert!(cell.get().is_some());
    }

    #[test]
    fn test_cached_value_ignores_later_environment_changes() {
        let cell = SettingsCell::new();
        cell.get_or_load(&ConfigLoader::new().with_source(full_source()))
            .unwrap();

        let changed = ConfigLoader::new().with_source(MapSource::new());
        let settings = cell.get_or_load(&changed).unwrap();
        assert_eq!(settings.github_username(), Some("bob"));
    }

    #[test]
    fn test_reset_forces_reload() {
        let cell = SettingsCell::new();
        let (loader, reads) = counting_loader(full_source());

        let first = cell.get_or_load(&loader).unwrap();
        cell.reset();
        assert!(cell.get().is_none());

        let before = reads.load(Ordering::SeqCst);
        let second = cell.get_or_load(&loader).unwrap();
        assert!(reads.load(Ordering::SeqCst) > before);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_first_callers_initialize_once() {
        let cell = SettingsCell::new();
        let inits = AtomicUsize::new(0);
        let loader = ConfigLoader::new().with_source(full_source());

        let results: Vec<Arc<Settings>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cell.get_or_try_init(|| {
                            inits.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(10));
                            loader.load_and_validate()
                        })
                        .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|s| Arc::ptr_eq(s, &results[0])));
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let cell = SettingsCell::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = cell.get_or_try_init(|| panic!("loader panicked"));
        }));

        let settings = cell
            .get_or_load(&ConfigLoader::new().with_source(full_source()))
            .unwrap();
        assert_eq!(settings.github_username(), Some("bob"));
    }
}
