//! Persisted operator overrides for the anchor constants.
//!
//! Overrides are stored as a small JSON object keyed by belt:
//!
//! ```json
//! { "belt1": 1000.0, "belt3": 9500.0 }
//! ```
//!
//! Belts missing from the file keep their built-in anchor.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::belt::BeltId;
use crate::calibration::AnchorConstants;
use crate::error::{Error, Result};

/// Environment variable that points at an explicit override file.
pub const ANCHOR_FILE_ENV: &str = "OVEN_TRANSIT_ANCHOR_FILE";

const ANCHOR_FILENAME: &str = "anchor_overrides.json";

/// Resolve the default override location using platform-specific project directories.
pub fn default_anchor_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "oven-transit", "oven-transit")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(ANCHOR_FILENAME))
}

/// Resolve the override file path.
///
/// Resolution order:
/// 1. Explicit `target` argument when provided.
/// 2. `OVEN_TRANSIT_ANCHOR_FILE` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_anchor_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }
    if let Some(env_path) = env::var_os(ANCHOR_FILE_ENV) {
        return Ok(PathBuf::from(env_path));
    }
    default_anchor_path()
}

/// Anchor overrides backed by a JSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorOverrideStore {
    path: PathBuf,
    values: BTreeMap<BeltId, f64>,
}

impl AnchorOverrideStore {
    /// Empty store bound to `path`. Nothing is read or written.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    /// Load overrides from `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "no anchor override file");
            return Ok(Self::empty(path));
        }

        let text = fs::read_to_string(&path)?;
        let raw: BTreeMap<String, f64> =
            serde_json::from_str(&text).map_err(|source| Error::OverrideParse {
                path: path.clone(),
                source,
            })?;

        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let belt: BeltId = key.parse()?;
            values.insert(belt, value);
        }
        debug!(path = %path.display(), count = values.len(), "loaded anchor overrides");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, belt: BeltId) -> Option<f64> {
        self.values.get(&belt).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Override one belt's anchor. The value must be finite and strictly positive.
    pub fn set(&mut self, belt: BeltId, value: f64) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::Calibration {
                belt,
                message: format!("anchor constant must be finite and positive, got {value}"),
            });
        }
        self.values.insert(belt, value);
        Ok(())
    }

    /// Drop one belt's override. Returns whether an override existed.
    pub fn clear(&mut self, belt: BeltId) -> bool {
        self.values.remove(&belt).is_some()
    }

    /// Drop every override.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Built-in anchors with these overrides applied on top.
    pub fn apply(&self, base: AnchorConstants) -> AnchorConstants {
        let mut anchors = base;
        for (belt, value) in &self.values {
            anchors.set(*belt, Some(*value));
        }
        anchors
    }

    /// Write the store back to its path, creating parent directories.
    ///
    /// An empty store removes the file instead.
    pub fn save(&self) -> Result<()> {
        if self.values.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
                info!(path = %self.path.display(), "removed anchor override file");
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw: BTreeMap<&'static str, f64> = self
            .values
            .iter()
            .map(|(belt, value)| (belt.key(), *value))
            .collect();
        let json = serde_json::to_string_pretty(&raw)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "saved anchor overrides");
        Ok(())
    }
}
