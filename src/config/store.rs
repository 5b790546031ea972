//! Thread-safe settings storage.
//!
//! The render thread writes configuration values through widget commands
//! and the worker thread reads them back when applying side effects, so
//! the container hands out snapshots rather than guarded references.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::SettingsError;
use crate::config::types::Settings;

/// Cloneable, thread-safe settings container bound to an on-disk path.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(settings: Settings, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Snapshot of the current settings. Cheap because `Settings` is small
    /// and `Clone`; multiple readers may call this concurrently.
    pub fn get(&self) -> Settings {
        self.inner.read().clone()
    }

    /// Mutate the shared settings under the write lock.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        let mut guard = self.inner.write();
        f(&mut guard);
    }

    /// Re-read the settings file, atomically replacing the current values.
    /// On failure the old values are kept and the error returned.
    pub fn reload(&self) -> Result<(), SettingsError> {
        let settings = Settings::load_from(&self.path)?;
        let mut guard = self.inner.write();
        *guard = settings;
        Ok(())
    }

    /// Write the current values to the settings file.
    pub fn save(&self) -> Result<(), SettingsError> {
        let snapshot = self.get();
        snapshot.save_to(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
