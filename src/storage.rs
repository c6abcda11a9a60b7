//! Asset lookup and per-request output directories.
//!
//! Outputs live under `<base_dir>/results/`. Each request gets a directory
//! named by a fresh [`SetId`]. The directory is populated, then renamed to
//! `<id>.iconset` as the single completion marker. An [`OutputDir`] that is
//! never finalized is removed, either explicitly via [`OutputDir::discard`]
//! or on drop.

use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::config::Theme;
use crate::error::{Error, Result};
use crate::resolution::Resolution;

/// Directory under the base path holding generated sets.
pub const RESULTS_DIR: &str = "results";

/// Suffix appended to a completed set's directory.
pub const ICONSET_SUFFIX: &str = ".iconset";

/// How many fresh identifiers to try before giving up on a collision.
pub const MAX_ID_ATTEMPTS: u32 = 4;

// ============================================================================
// StorageConfig
// ============================================================================

/// Filesystem locations used by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Fixed base path; sets are written to `<base_dir>/results/`.
    pub base_dir: PathBuf,

    /// Root of the built-in icon and folder template assets.
    pub assets_dir: PathBuf,

    /// Keep the non-suffixed directory of a failed request instead of deleting it.
    ///
    /// `true` reproduces the legacy behaviour, where an interrupted request
    /// leaves an orphaned `results/<id>` directory behind. The default `false`
    /// removes it.
    pub keep_partial: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            assets_dir: PathBuf::from("assets"),
            keep_partial: false,
        }
    }
}

impl StorageConfig {
    pub fn new(base_dir: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            assets_dir: assets_dir.into(),
            keep_partial: false,
        }
    }

    pub fn with_keep_partial(mut self, keep_partial: bool) -> Self {
        self.keep_partial = keep_partial;
        self
    }

    /// Reads `FOLDER_ART_BASE_DIR`, `FOLDER_ART_ASSETS_DIR` and
    /// `FOLDER_ART_KEEP_PARTIAL`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup("FOLDER_ART_BASE_DIR") {
            config.base_dir = dir.into();
        }
        if let Some(dir) = lookup("FOLDER_ART_ASSETS_DIR") {
            config.assets_dir = dir.into();
        }
        if let Some(flag) = lookup("FOLDER_ART_KEEP_PARTIAL") {
            config.keep_partial = matches!(flag.trim(), "1" | "true" | "yes");
        }
        config
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `<base_dir>/results`
    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_DIR)
    }
}

// ============================================================================
// AssetStore
// ============================================================================

/// Resolves built-in icons and folder templates to files.
///
/// ```text
/// <root>/icons/<id>.png | <id>.svg
/// <root>/folders/<theme>/<resolution stem>.png
/// ```
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the file for a built-in icon identifier.
    ///
    /// Identifiers are restricted to ASCII alphanumerics, `-` and `_`.
    pub async fn icon_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::NotFound(id.to_string()));
        }

        for ext in ["png", "svg"] {
            let path = self.root.join("icons").join(format!("{id}.{ext}"));
            if tokio::fs::try_exists(&path)
                .await
                .map_err(|e| Error::io(&path, e))?
            {
                return Ok(path);
            }
        }
        Err(Error::NotFound(id.to_string()))
    }

    /// Path of the folder template for a resolution and theme.
    pub fn folder_path(&self, resolution: Resolution, theme: Theme) -> PathBuf {
        self.root
            .join("folders")
            .join(theme.dir_name())
            .join(resolution.file_name())
    }
}

// ============================================================================
// SetId
// ============================================================================

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of one generated set: 16 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetId(String);

impl SetId {
    /// Derives a fresh identifier from `seed` plus clock, process and counter entropy.
    ///
    /// Two calls never hash identical input within one process.
    pub fn generate(seed: &[u8]) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut hasher = blake3::Hasher::new();
        hasher.update(seed);
        hasher.update(&nanos.to_le_bytes());
        hasher.update(&std::process::id().to_le_bytes());
        hasher.update(&ID_COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes());

        Self(hex::encode(&hasher.finalize().as_bytes()[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// OutputDir
// ============================================================================

/// Appends [`ICONSET_SUFFIX`] to a directory path.
pub fn completed_path(dir: &Path) -> PathBuf {
    let mut name = OsString::from(dir.as_os_str());
    name.push(ICONSET_SUFFIX);
    PathBuf::from(name)
}

/// A scoped, not-yet-complete output directory.
///
/// Dropping it without calling [`finalize`](Self::finalize) deletes the
/// directory unless `keep_partial` was requested.
#[derive(Debug)]
pub struct OutputDir {
    id: SetId,
    path: PathBuf,
    keep_partial: bool,
    released: bool,
}

impl OutputDir {
    /// Creates `<results_dir>/<id>` for a fresh id, retrying on collisions.
    pub async fn create(results_dir: &Path, seed: &[u8], keep_partial: bool) -> Result<Self> {
        tokio::fs::create_dir_all(results_dir)
            .await
            .map_err(|e| Error::io(results_dir, e))?;

        let mut attempt = 1;
        loop {
            let id = SetId::generate(seed);
            match Self::create_with_id(results_dir, id, keep_partial).await {
                Err(err) if err.is_retryable() && attempt < MAX_ID_ATTEMPTS => {
                    tracing::warn!(attempt, error = %err, "output directory collision, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Creates `<results_dir>/<id>`. Fails with [`Error::IdCollision`] if it,
    /// or its completed `.iconset` form, already exists.
    pub async fn create_with_id(results_dir: &Path, id: SetId, keep_partial: bool) -> Result<Self> {
        let path = results_dir.join(id.as_str());

        let completed = completed_path(&path);
        if tokio::fs::try_exists(&completed)
            .await
            .map_err(|e| Error::io(&completed, e))?
        {
            return Err(Error::IdCollision(completed));
        }

        match tokio::fs::create_dir(&path).await {
            Ok(()) => Ok(Self {
                id,
                path,
                keep_partial,
                released: false,
            }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(Error::IdCollision(path)),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn id(&self) -> &SetId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one file into the directory.
    pub async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Renames the directory to its `.iconset` form, marking it complete.
    pub async fn finalize(mut self) -> Result<PathBuf> {
        let target = completed_path(&self.path);
        tokio::fs::rename(&self.path, &target)
            .await
            .map_err(|e| Error::io(&self.path, e))?;
        self.released = true;
        Ok(target)
    }

    /// Deletes the directory, or leaves it in place when `keep_partial` is set.
    pub async fn discard(mut self) {
        self.released = true;
        if self.keep_partial {
            tracing::info!(path = %self.path.display(), "keeping partial output directory");
            return;
        }
        if let Err(e) = tokio::fs::remove_dir_all(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove partial output directory");
        }
    }
}

/// Last-resort cleanup for a directory that was neither finalized nor discarded,
/// typically because the generating future was cancelled.
///
/// `Drop` cannot await, so this uses blocking `std::fs::remove_dir_all` on
/// whichever thread drops the value, possibly an async executor worker. The
/// normal failure path goes through [`OutputDir::discard`] instead.
impl Drop for OutputDir {
    fn drop(&mut self) {
        if self.released || self.keep_partial {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove abandoned output directory");
            }
        }
    }
}
