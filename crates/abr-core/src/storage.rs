#![forbid(unsafe_code)]

//! Best-effort key-value storage (the browser's local storage).
//!
//! The store may be absent, full, or cleared at any time. Callers treat
//! every failure as "nothing persisted" and carry on; [`StorageError`]
//! exists so the failure can be logged, never so it can be propagated to
//! the user.

use std::collections::HashMap;
use std::fmt;

/// Key holding the selected theme (`light` / `dark`).
pub const THEME_KEY: &str = "theme";
/// Key holding the selected language code.
pub const LANGUAGE_KEY: &str = "language";
/// Key holding the advisory theme usage counters (JSON object).
pub const THEME_USAGE_KEY: &str = "themeUsage";

/// Storage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage is available in this environment.
    Unavailable,
    /// The write would exceed the storage quota.
    QuotaExceeded { key: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::QuotaExceeded { key } => write!(f, "storage quota exceeded writing {key:?}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store.
pub trait KeyValueStore {
    /// Read a value. Missing keys and unreadable stores both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// In-memory store with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(bytes),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, as a user clearing site data would.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { key: key.to_owned() });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store for environments without local storage: reads nothing, rejects
/// every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }
}
