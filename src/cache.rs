//! Persistent storage of translation results.
//!
//! [`ResultCache`] is the seam the client depends on; [`FileResultCache`] is the
//! filesystem implementation, storing one plain-text file per translation under
//! `{root}/{source}_{target}-{prefix}/{remainder}` where `prefix`/`remainder` are
//! the first 4 and remaining 28 hex characters of a 128-bit digest of the text.
//!
//! There is no expiry, eviction or size bound. Entries are only ever replaced
//! by saving the same key again.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error};

/// Default permission bits for cache directories (applied on Unix).
pub const DEFAULT_DIR_MODE: u32 = 0o777;

const PREFIX_LEN: usize = 4;
const DIGEST_BYTES: usize = 16;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Unable to create directory \"{}\" with mode \"{:o}\": {source}", .path.display(), .mode)]
    CreateDir {
        path: PathBuf,
        mode: u32,
        #[source]
        source: io::Error,
    },

    #[error("Can not write to cache file \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Can not read cache file \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid cache key: {0}")]
    KeyDerivation(String),
}

/// Key-value store for `(text, source tag, target tag) -> translation`.
///
/// `source` is the locale tag or the `"NULL"` sentinel when the source
/// language was left to auto-detection.
pub trait ResultCache: Send + Sync {
    /// Look up a stored translation.
    ///
    /// Must not fail on an ordinary miss. Implementations treat empty entries
    /// and internal failures as a miss.
    fn load(&self, text: &str, source: &str, target: &str) -> Option<String>;

    /// Store a translation.
    ///
    /// # Errors
    /// Returns [`CacheError`] if the entry cannot be persisted.
    fn save(
        &self,
        text: &str,
        translation: &str,
        source: &str,
        target: &str,
    ) -> Result<(), CacheError>;
}

/// Filesystem-backed [`ResultCache`], sharded by hash prefix.
#[derive(Debug, Clone)]
pub struct FileResultCache {
    root: PathBuf,
    mode: u32,
}

impl FileResultCache {
    /// Open a cache rooted at `root`, or the per-install default under the
    /// system temp directory when `None`. The root directory is created if missing.
    pub fn new(root: Option<PathBuf>) -> Result<Self, CacheError> {
        Self::with_mode(root, DEFAULT_DIR_MODE)
    }

    /// Like [`FileResultCache::new`], with explicit permission bits for created directories.
    pub fn with_mode(root: Option<PathBuf>, mode: u32) -> Result<Self, CacheError> {
        let cache = Self {
            root: root.unwrap_or_else(default_root),
            mode,
        };
        cache.create_dir(&cache.root)?;
        Ok(cache)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the file path for a key without touching the filesystem.
    ///
    /// Text is trimmed before hashing, so surrounding whitespace never
    /// produces a distinct entry.
    pub fn entry_path(&self, text: &str, source: &str, target: &str) -> Result<PathBuf, CacheError> {
        validate_tag(source)?;
        validate_tag(target)?;

        let hash = hash_text(text.trim());
        let (prefix, remainder) = hash.split_at(PREFIX_LEN);

        Ok(self
            .root
            .join(format!("{}_{}-{}", source, target, prefix))
            .join(remainder))
    }

    /// Create `dir` and any missing parents.
    ///
    /// Losing a creation race is fine: an error is only reported if the
    /// directory still does not exist afterwards.
    fn create_dir(&self, dir: &Path) -> Result<(), CacheError> {
        if dir.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.mode);
        }

        settle_create_dir(dir, self.mode, builder.create(dir))
    }

    fn read_entry(path: &Path) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(path) {
            Ok(content) if content.is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl ResultCache for FileResultCache {
    fn load(&self, text: &str, source: &str, target: &str) -> Option<String> {
        let path = match self.entry_path(text, source, target) {
            Ok(path) => path,
            Err(e) => {
                error!("Translation cache lookup failed: {}", e);
                return None;
            }
        };

        match Self::read_entry(&path) {
            Ok(entry) => entry,
            Err(e) => {
                error!("Translation cache lookup failed: {}", e);
                None
            }
        }
    }

    fn save(
        &self,
        text: &str,
        translation: &str,
        source: &str,
        target: &str,
    ) -> Result<(), CacheError> {
        let path = self.entry_path(text, source, target)?;
        if let Some(shard) = path.parent() {
            self.create_dir(shard)?;
        }

        write_entry(&path, translation)?;

        debug!("Cached translation at {}", path.display());
        Ok(())
    }
}

/// A failed creation is only an error if the directory is still missing.
fn settle_create_dir(dir: &Path, mode: u32, created: io::Result<()>) -> Result<(), CacheError> {
    match created {
        Ok(()) => Ok(()),
        Err(_) if dir.is_dir() => Ok(()),
        Err(source) => Err(CacheError::CreateDir {
            path: dir.to_path_buf(),
            mode,
            source,
        }),
    }
}

/// Write through a sibling temp file and rename it into place, so readers
/// never see a partially written entry.
fn write_entry(path: &Path, translation: &str) -> Result<(), CacheError> {
    let write_error = |source: io::Error| CacheError::Write {
        path: path.to_path_buf(),
        source,
    };
    let shard = path.parent().unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(shard).map_err(write_error)?;
    file.write_all(translation.as_bytes()).map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Hex-encoded 128-bit digest (truncated SHA-256).
fn hash_text(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest[..DIGEST_BYTES]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Tags become part of a directory name, so they must not escape the root.
fn validate_tag(tag: &str) -> Result<(), CacheError> {
    if tag.is_empty() {
        return Err(CacheError::KeyDerivation("empty locale tag".to_string()));
    }
    if tag.contains(['/', '\\', '\0']) || tag.contains("..") {
        return Err(CacheError::KeyDerivation(format!(
            "locale tag \"{}\" is not usable in a path",
            tag
        )));
    }
    Ok(())
}

/// `<temp>/deepl/<8 hex chars>`, where the suffix identifies this build of the
/// library so independent installs do not share a cache.
fn default_root() -> PathBuf {
    let identity = concat!(env!("CARGO_MANIFEST_DIR"), "/", file!());
    let hash = hash_text(identity);
    std::env::temp_dir().join("deepl").join(&hash[..8])
}
