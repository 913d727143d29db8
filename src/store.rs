//! Best-score persistence
//!
//! The simulation only needs a tiny key-value surface: one integer under
//! [`crate::consts::BEST_SCORE_KEY`]. Backends:
//! - [`MemoryStore`]: in-process, used by tests and as a fallback
//! - [`FileStore`]: JSON file on disk (native only)
//! - [`LocalStorageStore`]: browser LocalStorage (WASM only)

use std::collections::BTreeMap;

use crate::error::StoreError;

/// Persistent key-value store for integer scores
pub trait ScoreStore {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u64>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_value(key: &str, value: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// JSON file store: a flat object of key -> integer
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    const FILE_NAME: &'static str = "scores.json";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/flappy-loop/scores.json`, if the platform has a data dir
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::data_dir().map(|dir| dir.join("flappy-loop").join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Wrote {key}={value} to {}", self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage store; values are kept as decimal strings
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage is not accessible".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let raw = Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable(format!("cannot read `{key}`")))?;

        Ok(raw.and_then(|s| match s.trim().parse::<u64>() {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring non-numeric LocalStorage value for `{key}`: {s:?}");
                None
            }
        }))
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable(format!("cannot write `{key}`")))
    }
}
