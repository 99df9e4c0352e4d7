//! The dependency catalog: every runtime build this tool can install.
//!
//! The catalog ships with the buildpack as `buildpack.toml`:
//!
//! ```toml
//! [buildpack]
//! id = "paketo-buildpacks/dotnet-core-runtime"
//! name = "Dotnet Core Runtime Buildpack"
//! version = "1.4.0"
//!
//! [metadata.default-versions]
//! dotnet-runtime = "6.0.*"
//!
//! [[metadata.dependencies]]
//! id = "dotnet-runtime"
//! version = "6.0.5"
//! checksum = "sha256:..."
//! uri = "file:///cache/dotnet-runtime-6.0.5.tar.xz"
//! platforms = ["io.buildpacks.stacks.jammy"]
//! ```
//!
//! `sha256` and `stacks` are accepted as aliases of `checksum` and `platforms`.
//!
//! Resolution only needs the [`VersionCatalog`] trait; [`BuildpackCatalog`]
//! is the file-backed implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::ResolveError;

/// One installable build of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Dependency identifier, e.g. `dotnet-runtime`
    pub id: String,
    /// Semantic version string
    pub version: String,
    /// Artifact fingerprint, compared verbatim for layer reuse
    #[serde(alias = "sha256")]
    pub checksum: String,
    /// Where the artifact can be fetched from
    pub uri: String,
    /// Platforms this build runs on
    #[serde(alias = "stacks", default)]
    pub platforms: Vec<String>,
}

impl DependencyRecord {
    /// Whether this build targets `platform`.
    #[must_use]
    pub fn supports(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }
}

/// Read access to the versions known for each dependency.
pub trait VersionCatalog {
    /// All records whose id is `id`, in catalog order.
    fn dependencies(&self, id: &str) -> Vec<&DependencyRecord>;

    /// The version to use when a request names no version, if configured.
    fn default_version(&self, id: &str) -> Option<&str>;
}

/// Identity of the buildpack that ships the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackInfo {
    /// Buildpack id
    #[serde(default)]
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Buildpack release version
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogMetadata {
    #[serde(default)]
    dependencies: Vec<DependencyRecord>,
    #[serde(default, rename = "default-versions")]
    default_versions: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    buildpack: BuildpackInfo,
    #[serde(default)]
    metadata: CatalogMetadata,
}

/// A catalog decoded from a `buildpack.toml` document.
#[derive(Debug, Clone, Default)]
pub struct BuildpackCatalog {
    /// Buildpack identity from the `[buildpack]` table
    pub buildpack: BuildpackInfo,
    records: Vec<DependencyRecord>,
    default_versions: BTreeMap<String, String>,
}

impl BuildpackCatalog {
    /// Build a catalog from records directly.
    #[must_use]
    pub fn new(records: Vec<DependencyRecord>) -> Self {
        Self {
            buildpack: BuildpackInfo::default(),
            records,
            default_versions: BTreeMap::new(),
        }
    }

    /// Configure the default version for a dependency id.
    #[must_use]
    pub fn with_default_version(mut self, id: impl Into<String>, version: impl Into<String>) -> Self {
        self.default_versions.insert(id.into(), version.into());
        self
    }

    /// Load and decode a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::CatalogReadError`] if the file cannot be read
    /// or is not a valid catalog document. The decoder message is kept so the
    /// operator can locate the syntax problem.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let read_error = |reason: String| ResolveError::CatalogReadError {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        let document: CatalogDocument = toml::from_str(&content).map_err(|e| read_error(e.to_string()))?;

        tracing::debug!(
            "Loaded {} catalog entries from {}",
            document.metadata.dependencies.len(),
            path.display()
        );

        Ok(Self {
            buildpack: document.buildpack,
            records: document.metadata.dependencies,
            default_versions: document.metadata.default_versions,
        })
    }

    /// Every record, in catalog order.
    #[must_use]
    pub fn records(&self) -> &[DependencyRecord] {
        &self.records
    }
}

impl VersionCatalog for BuildpackCatalog {
    fn dependencies(&self, id: &str) -> Vec<&DependencyRecord> {
        self.records.iter().filter(|r| r.id == id).collect()
    }

    fn default_version(&self, id: &str) -> Option<&str> {
        self.default_versions.get(id).map(String::as_str)
    }
}
