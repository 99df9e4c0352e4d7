//! Build plan requests and their reconciliation.
//!
//! Several mechanisms may ask for the runtime at once: the environment
//! override, the deprecated `buildpack.yml`, a project file, or a generated
//! `*.runtimeconfig.json`. Each ask is a [`PlanRequest`] tagged with its
//! [`VersionSource`]. The [`PlanEntryResolver`] collapses them into one
//! [`CanonicalRequest`]: the version and source come from the most trusted
//! request, while the build/launch flags are OR-merged across all of them.
//!
//! # Source Priority
//!
//! | Source | Label | Priority | Roll-forward |
//! |--------|-------|----------|--------------|
//! | [`VersionSource::ExplicitOverrideEnv`] | `BP_DOTNET_FRAMEWORK_VERSION` | 4 | no |
//! | [`VersionSource::LegacyConfigFile`] | `buildpack.yml` | 3 | no |
//! | [`VersionSource::ProjectManifest`] | `*.csproj`, `*.fsproj`, `*.vbproj` | 2 | yes |
//! | [`VersionSource::RuntimeConfigFile`] | `runtimeconfig.json` | 2 | yes |
//! | [`VersionSource::Unknown`] | none | -1 | yes |
//!
//! # Examples
//!
//! ```rust,no_run
//! use runtime_resolver::plan::{PlanEntryResolver, PlanRequest, VersionSource};
//!
//! let requests = vec![
//!     PlanRequest::new("dotnet-runtime", "6.0.0", VersionSource::RuntimeConfigFile).launch(true),
//!     PlanRequest::new("dotnet-runtime", "6.0.5", VersionSource::ExplicitOverrideEnv),
//! ];
//!
//! let canonical = PlanEntryResolver::resolve(&requests);
//! assert_eq!(canonical.requested_version, "6.0.5");
//! assert!(canonical.wants_launch_time);
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::constants::{LEGACY_CONFIG_FILE, OVERRIDE_ENV_VAR, RUNTIME_CONFIG_LABEL};

pub mod entry_resolver;
pub mod io;

pub use entry_resolver::{PlanEntryResolver, format_candidates};
pub use io::{BuildPlan, PlanEntry};

/// Project descriptor files: C#, F# and Visual Basic project files.
const PROJECT_FILE_PATTERN: &str = r"\.(cs|fs|vb)proj$";

fn project_file_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PROJECT_FILE_PATTERN).ok()).as_ref()
}

/// The mechanism that produced a version request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSource {
    /// `$BP_DOTNET_FRAMEWORK_VERSION`; matched exactly
    ExplicitOverrideEnv,
    /// Deprecated `buildpack.yml`; matched exactly
    LegacyConfigFile,
    /// A project descriptor, carrying its file name (e.g. `app.csproj`)
    ProjectManifest(String),
    /// A generated `*.runtimeconfig.json`
    RuntimeConfigFile,
    /// No source tag, or one this tool does not recognise
    Unknown,
}

impl VersionSource {
    /// Map a `version-source` metadata label onto a source.
    ///
    /// Unrecognised labels become [`VersionSource::Unknown`].
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(OVERRIDE_ENV_VAR) => Self::ExplicitOverrideEnv,
            Some(LEGACY_CONFIG_FILE) => Self::LegacyConfigFile,
            Some(RUNTIME_CONFIG_LABEL) => Self::RuntimeConfigFile,
            Some(other) if project_file_regex().is_some_and(|re| re.is_match(other)) => {
                Self::ProjectManifest(other.to_string())
            }
            _ => Self::Unknown,
        }
    }

    /// Reconciliation priority; higher wins.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        match self {
            Self::ExplicitOverrideEnv => 4,
            Self::LegacyConfigFile => 3,
            Self::ProjectManifest(_) | Self::RuntimeConfigFile => 2,
            Self::Unknown => -1,
        }
    }

    /// Whether a request from this source may resolve to a newer patch or minor release.
    #[must_use]
    pub const fn permits_roll_forward(&self) -> bool {
        !matches!(self, Self::ExplicitOverrideEnv | Self::LegacyConfigFile)
    }

    /// Label shown in diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        self.metadata_label().unwrap_or("<unknown>")
    }

    /// Value written to the `version-source` plan metadata key, if any.
    #[must_use]
    pub fn metadata_label(&self) -> Option<&str> {
        match self {
            Self::ExplicitOverrideEnv => Some(OVERRIDE_ENV_VAR),
            Self::LegacyConfigFile => Some(LEGACY_CONFIG_FILE),
            Self::ProjectManifest(file) => Some(file),
            Self::RuntimeConfigFile => Some(RUNTIME_CONFIG_LABEL),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One raw request for a dependency, as declared by a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Dependency name the request is for
    pub dependency_name: String,
    /// Version as written by the source: exact, partial, wildcard, `default`, or empty
    pub requested_version: String,
    /// Where the request came from
    pub source: VersionSource,
    /// Dependency must be available to later build steps
    pub wants_build_time: bool,
    /// Dependency must be present in the launch image
    pub wants_launch_time: bool,
}

impl PlanRequest {
    /// Create a request with both layer flags unset.
    pub fn new(
        dependency_name: impl Into<String>,
        requested_version: impl Into<String>,
        source: VersionSource,
    ) -> Self {
        Self {
            dependency_name: dependency_name.into(),
            requested_version: requested_version.into(),
            source,
            wants_build_time: false,
            wants_launch_time: false,
        }
    }

    /// Set the build-time flag.
    #[must_use]
    pub const fn build(mut self, wanted: bool) -> Self {
        self.wants_build_time = wanted;
        self
    }

    /// Set the launch-time flag.
    #[must_use]
    pub const fn launch(mut self, wanted: bool) -> Self {
        self.wants_launch_time = wanted;
        self
    }
}

/// The single request that survives reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Dependency name
    pub dependency_name: String,
    /// Version from the highest-priority request
    pub requested_version: String,
    /// Source of the highest-priority request
    pub source: VersionSource,
    /// True if any request wanted the dependency at build time
    pub wants_build_time: bool,
    /// True if any request wanted the dependency at launch time
    pub wants_launch_time: bool,
}
