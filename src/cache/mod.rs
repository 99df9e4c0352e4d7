//! Layer reuse decisions and persisted layer state.
//!
//! A build installs the runtime into a single layer directory,
//! `<layers>/dotnet-core-runtime/`, and describes it in a sibling
//! `<layers>/dotnet-core-runtime.toml`:
//!
//! ```toml
//! [types]
//! build = false
//! launch = true
//! cache = false
//!
//! [metadata]
//! dependency-sha = "sha256:..."
//! built_at = "2024-05-01T12:00:00Z"
//! ```
//!
//! The [`CacheCoordinator`] decides from the stored fingerprint whether the
//! layer can be kept as-is, and which of the three type flags a fresh
//! install should carry. [`LayerStore`] reads and writes the metadata file.
//!
//! The layers directory is owned by a single build process; nothing here locks.

pub mod layer;

pub use layer::{LayerMetadata, LayerStore};

use crate::catalog::DependencyRecord;
use crate::plan::CanonicalRequest;

/// What a previous build left behind for the layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledState {
    /// Checksum of the installed artifact; empty when nothing is installed
    pub dependency_fingerprint: String,
}

impl InstalledState {
    /// State recording `fingerprint` as installed.
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            dependency_fingerprint: fingerprint.into(),
        }
    }

    /// Whether no fingerprint has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependency_fingerprint.is_empty()
    }
}

/// The three layer type flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerFlags {
    /// Visible to later build steps
    pub build: bool,
    /// Included in the launch image
    pub launch: bool,
    /// Kept across rebuilds
    pub cache: bool,
}

/// Stateless decisions about reusing the installed layer.
pub struct CacheCoordinator;

impl CacheCoordinator {
    /// Whether the installed layer already holds `resolved`.
    ///
    /// Fingerprints are compared verbatim. An empty stored fingerprint never
    /// matches, even against a catalog record with an empty checksum.
    #[must_use]
    pub fn should_reuse(installed: &InstalledState, resolved: &DependencyRecord) -> bool {
        !installed.is_empty() && installed.dependency_fingerprint == resolved.checksum
    }

    /// Layer flags for a fresh install of `request`.
    ///
    /// Only build-time layers are cached; launch layers end up in the image anyway.
    #[must_use]
    pub const fn layer_flags(request: &CanonicalRequest) -> LayerFlags {
        LayerFlags {
            build: request.wants_build_time,
            launch: request.wants_launch_time,
            cache: request.wants_build_time,
        }
    }
}
