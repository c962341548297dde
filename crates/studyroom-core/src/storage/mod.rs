//! Persistence for the entity store and application settings.
//!
//! Collections are stored as JSON strings under fixed keys in a key-value
//! backend. The SQLite backend keeps them in a single `kv` table; the
//! in-memory backend is used by tests and by hosts without a disk.

mod config;
pub mod database;
mod memory;

pub use config::{
    Config, DashboardConfig, GradesConfig, NotificationsConfig, RemindersConfig, TimerSettings,
};
pub use database::Database;
pub use memory::MemoryKv;

use std::path::PathBuf;

use crate::error::StorageError;

/// Minimal key-value persistence, one string value per key.
pub trait KvBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the entry entirely. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Write every entry or none of them.
    ///
    /// The default writes one key at a time and, on failure, puts back the
    /// previous values of the keys already written. Backends with real
    /// transactions override it.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut previous: Vec<(&str, Option<String>)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let before = self.get(key)?;
            if let Err(e) = self.set(key, value) {
                for (key, before) in previous.into_iter().rev() {
                    let restored = match before {
                        Some(v) => self.set(key, &v),
                        None => self.remove(key),
                    };
                    if let Err(restore_err) = restored {
                        tracing::warn!(key, "could not restore previous value: {restore_err}");
                    }
                }
                return Err(e);
            }
            previous.push((*key, before));
        }
        Ok(())
    }
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}

/// Returns `~/.config/studyroom[-dev]/` based on STUDYROOM_ENV.
///
/// Set STUDYROOM_ENV=dev to use the development data directory.
/// STUDYROOM_HOME replaces `~/.config` as the base directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = match std::env::var_os("STUDYROOM_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyroom-dev")
    } else {
        base_dir.join("studyroom")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
