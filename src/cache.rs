//! Content-addressed palette cache.
//!
//! Keys hash the image path, its modification time, the light/dark preference
//! and the mode, so editing the image always produces a fresh key. Records
//! carry a format version; a record from another version is a miss.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::ExtractorConfig;
use crate::error::CacheError;
use crate::pipeline::assign::Mode;
use crate::theme::AnsiPalette;

/// Bump when the record layout or the extraction output changes.
pub const CACHE_VERSION: u32 = 2;

const APP_DIR: &str = "hueprint";

/// `<platform cache dir>/hueprint/palettes`, if the platform has one.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_DIR).join("palettes"))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Hash of `"{path}-{mtime}-{light|dark}"`, with `"-{mode}"` appended for
    /// any mode other than the default.
    pub fn new(path: &Path, mtime_secs: i64, prefer_light: bool, mode: Mode) -> Self {
        Self::hash(&Self::source(path, mtime_secs, prefer_light, mode))
    }

    /// Like [`CacheKey::new`], with `"-{tag}"` appended when `config` departs
    /// from the defaults in a way that changes the palette.
    pub fn for_config(
        path: &Path,
        mtime_secs: i64,
        prefer_light: bool,
        mode: Mode,
        config: &ExtractorConfig,
    ) -> Self {
        let mut source = Self::source(path, mtime_secs, prefer_light, mode);
        if let Some(tag) = config.output_tag() {
            source.push('-');
            source.push_str(&tag);
        }
        Self::hash(&source)
    }

    fn source(path: &Path, mtime_secs: i64, prefer_light: bool, mode: Mode) -> String {
        let variant = if prefer_light { "light" } else { "dark" };
        let mut source = format!("{}-{}-{}", path.display(), mtime_secs, variant);
        if mode != Mode::Default {
            source.push('-');
            source.push_str(mode.as_str());
        }
        source
    }

    fn hash(source: &str) -> Self {
        let digest = Sha256::digest(source.as_bytes());
        // First 16 bytes of the hash, 32 hex characters.
        Self(hex::encode(&digest[..16]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted form of one cached palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub palette: [String; 16],
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub version: u32,
}

impl CacheRecord {
    pub fn new(palette: &AnsiPalette) -> Self {
        Self {
            palette: palette.to_hex_strings(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            version: CACHE_VERSION,
        }
    }
}

/// Only the version, so records of any layout can be checked before parsing.
#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

/// Backing storage for cache records.
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` for a plain miss.
    fn load(&self, key: &CacheKey) -> Result<Option<CacheRecord>, CacheError>;
    fn store(&self, key: &CacheKey, record: &CacheRecord) -> Result<(), CacheError>;
    fn clear(&self) -> Result<(), CacheError>;
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl CacheStore for DiskCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheRecord>, CacheError> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let probe: VersionProbe = serde_json::from_slice(&bytes)?;
        if probe.version != Some(CACHE_VERSION) {
            tracing::debug!(
                key = %key,
                found = ?probe.version,
                expected = CACHE_VERSION,
                "cache record from another version"
            );
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn store(&self, key: &CacheKey, record: &CacheRecord) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec(record)?;

        // Write beside the target and rename, so readers see whole records.
        let tmp = self.dir.join(format!(
            "{}.{}.{}.tmp",
            key.as_str(),
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::write(&tmp, json)?;
        if let Err(e) = std::fs::rename(&tmp, self.path_for(key)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            let ours = path
                .extension()
                .is_some_and(|ext| ext == "json" || ext == "tmp");
            if ours && path.is_file() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// In-process store, for tests and embedders that do not want disk state.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, CacheRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheRecord>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::Corrupt("memory cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &CacheKey, record: &CacheRecord) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::Corrupt("memory cache lock poisoned".to_string()))?;
        entries.insert(key.clone(), record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::Corrupt("memory cache lock poisoned".to_string()))?;
        entries.clear();
        Ok(())
    }
}

/// Palette-level cache over a [`CacheStore`]. Every store failure is logged
/// and degrades to a miss; nothing here fails an extraction.
#[derive(Clone)]
pub struct ExtractionCache {
    store: Arc<dyn CacheStore>,
}

impl ExtractionCache {
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, key: &CacheKey) -> Option<AnsiPalette> {
        let record = match self.store.load(key) {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(key = %key, "palette cache miss");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "palette cache read failed");
                return None;
            }
        };

        if record.version != CACHE_VERSION {
            tracing::debug!(key = %key, version = record.version, "stale palette cache record");
            return None;
        }

        match AnsiPalette::from_hex_strings(&record.palette) {
            Ok(palette) => {
                tracing::debug!(key = %key, "palette cache hit");
                Some(palette)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "corrupt palette cache record");
                None
            }
        }
    }

    pub fn put(&self, key: &CacheKey, palette: &AnsiPalette) {
        if let Err(e) = self.store.store(key, &CacheRecord::new(palette)) {
            tracing::warn!(key = %key, error = %e, "palette cache write failed");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "palette cache clear failed");
        }
    }
}

impl std::fmt::Debug for ExtractionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionCache").finish_non_exhaustive()
    }
}
