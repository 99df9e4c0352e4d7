//! The `<layers>/<name>.toml` metadata file.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{InstalledState, LayerFlags};
use crate::constants::{BUILT_AT_KEY, FINGERPRINT_KEY};
use crate::utils::{reset_dir, safe_write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct LayerTypes {
    #[serde(default)]
    build: bool,
    #[serde(default)]
    launch: bool,
    #[serde(default)]
    cache: bool,
}

impl From<LayerFlags> for LayerTypes {
    fn from(flags: LayerFlags) -> Self {
        Self {
            build: flags.build,
            launch: flags.launch,
            cache: flags.cache,
        }
    }
}

impl From<LayerTypes> for LayerFlags {
    fn from(types: LayerTypes) -> Self {
        Self {
            build: types.build,
            launch: types.launch,
            cache: types.cache,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LayerDocument {
    #[serde(default)]
    types: LayerTypes,
    #[serde(default)]
    metadata: toml::Table,
}

/// Everything written about a layer after an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerMetadata {
    /// Layer type flags
    pub flags: LayerFlags,
    /// Checksum of the installed artifact
    pub fingerprint: String,
    /// When the install finished
    pub built_at: DateTime<Utc>,
}

impl LayerMetadata {
    fn to_document(&self) -> LayerDocument {
        let mut metadata = toml::Table::new();
        metadata.insert(FINGERPRINT_KEY.into(), self.fingerprint.clone().into());
        metadata.insert(
            BUILT_AT_KEY.into(),
            self.built_at.to_rfc3339_opts(SecondsFormat::Secs, true).into(),
        );

        LayerDocument {
            types: self.flags.into(),
            metadata,
        }
    }
}

/// Reads and writes one named layer under a layers directory.
#[derive(Debug, Clone)]
pub struct LayerStore {
    layers_dir: PathBuf,
    name: String,
}

impl LayerStore {
    /// Store for layer `name` under `layers_dir`.
    pub fn new(layers_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            layers_dir: layers_dir.into(),
            name: name.into(),
        }
    }

    /// The layer's content directory.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.layers_dir.join(&self.name)
    }

    /// The layer's metadata file.
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.layers_dir.join(format!("{}.toml", self.name))
    }

    /// Read the fingerprint a previous build recorded.
    ///
    /// A missing file, a file without a fingerprint, or an unreadable
    /// document all yield an empty state, which forces a reinstall.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    pub fn read_state(&self) -> Result<InstalledState> {
        let path = self.metadata_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(InstalledState::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read layer metadata: {}", path.display()));
            }
        };

        let document: LayerDocument = match toml::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Ignoring unreadable layer metadata {}: {}", path.display(), e);
                return Ok(InstalledState::default());
            }
        };

        let fingerprint = document
            .metadata
            .get(FINGERPRINT_KEY)
            .and_then(toml::Value::as_str)
            .unwrap_or_default();

        Ok(InstalledState::new(fingerprint))
    }

    /// Read the layer type flags, if metadata exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_flags(&self) -> Result<Option<LayerFlags>> {
        let path = self.metadata_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read layer metadata: {}", path.display()))?;
        let document: LayerDocument = toml::from_str(&content)
            .with_context(|| format!("Invalid layer metadata: {}", path.display()))?;
        Ok(Some(document.types.into()))
    }

    /// Replace the layer's metadata file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, metadata: &LayerMetadata) -> Result<()> {
        let path = self.metadata_path();
        let content = toml::to_string(&metadata.to_document()).context("Failed to serialize layer metadata")?;
        safe_write(&path, &content)
    }

    /// Drop the metadata file, empty the layer directory (creating it if
    /// needed) and return its path.
    ///
    /// The metadata goes first so an interrupted install reads back as
    /// nothing installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be removed or the directory
    /// cannot be cleared or created.
    pub fn reset(&self) -> Result<PathBuf> {
        let metadata_path = self.metadata_path();
        match fs::remove_file(&metadata_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to remove layer metadata: {}", metadata_path.display()));
            }
        }

        let path = self.path();
        reset_dir(&path)?;
        Ok(path)
    }
}
