//! The build pipeline: plan → canonical request → catalog record → layer.
//!
//! ```text
//! plan entries ──PlanEntryResolver──▶ CanonicalRequest
//!                                         │
//! buildpack.toml ──ConstraintResolver─────▶ Resolution
//!                                         │
//! <layers>/<layer>.toml ──CacheCoordinator─▶ reuse │ install
//! ```
//!
//! A build either reuses the existing layer untouched, or empties it, runs
//! the [`DependencyInstaller`] and records the new fingerprint. Any error
//! aborts the build; nothing is retried.

pub mod installer;

pub use installer::{DependencyInstaller, FileUriInstaller};

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::cache::{CacheCoordinator, InstalledState, LayerFlags, LayerMetadata, LayerStore};
use crate::catalog::BuildpackCatalog;
use crate::constants::{CATALOG_FILE, DEPENDENCY_ID, LAYER_NAME, OVERRIDE_ENV_VAR};
use crate::core::ResolveError;
use crate::detect::detect_from_env;
use crate::plan::{BuildPlan, CanonicalRequest, PlanEntryResolver, PlanRequest, VersionSource};
use crate::version::{ConstraintResolver, Resolution, parse_version};

/// Inputs of a build, gathered once from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Application root
    pub working_dir: PathBuf,
    /// Build plan to read; when absent the application is detected instead
    pub plan_path: Option<PathBuf>,
    /// Dependency catalog
    pub catalog_path: PathBuf,
    /// Layers directory; required to install, optional to resolve
    pub layers_dir: Option<PathBuf>,
    /// Target platform (stack) identifier
    pub platform: String,
}

impl BuildConfig {
    /// Configuration with no plan file and no layers directory.
    pub fn new(
        working_dir: impl Into<PathBuf>,
        catalog_path: impl Into<PathBuf>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            plan_path: None,
            catalog_path: catalog_path.into(),
            layers_dir: None,
            platform: platform.into(),
        }
    }

    /// Read requests from `plan_path` instead of detecting them.
    #[must_use]
    pub fn with_plan(mut self, plan_path: impl Into<PathBuf>) -> Self {
        self.plan_path = Some(plan_path.into());
        self
    }

    /// Use `layers_dir` for installed state.
    #[must_use]
    pub fn with_layers(mut self, layers_dir: impl Into<PathBuf>) -> Self {
        self.layers_dir = Some(layers_dir.into());
        self
    }

    /// The catalog shipped in a buildpack directory.
    #[must_use]
    pub fn default_catalog_path(buildpack_dir: &Path) -> PathBuf {
        buildpack_dir.join(CATALOG_FILE)
    }

    fn layer_store(&self) -> Option<LayerStore> {
        self.layers_dir.as_ref().map(|dir| LayerStore::new(dir, LAYER_NAME))
    }

    fn requests(&self) -> Result<Vec<PlanRequest>> {
        match &self.plan_path {
            Some(path) => Ok(BuildPlan::load(path)?.requests_for(DEPENDENCY_ID)),
            None => detect_from_env(&self.working_dir)
                .with_context(|| format!("Failed to detect application in {}", self.working_dir.display())),
        }
    }
}

/// The resolved dependency and what is currently installed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Reconciled request
    pub request: CanonicalRequest,
    /// Catalog record chosen for the request
    pub resolution: Resolution,
    /// Fingerprint recorded by a previous build, empty without one
    pub installed: InstalledState,
}

impl Selection {
    /// Whether the installed layer already holds the chosen record.
    #[must_use]
    pub fn reusable(&self) -> bool {
        CacheCoordinator::should_reuse(&self.installed, &self.resolution.dependency)
    }

    /// Flags a fresh install would carry.
    #[must_use]
    pub const fn layer_flags(&self) -> LayerFlags {
        CacheCoordinator::layer_flags(&self.request)
    }
}

/// How a build finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The layer already held the chosen record and was left alone
    Reused {
        /// The resolution that was found installed
        selection: Selection,
        /// Layer directory
        layer_path: PathBuf,
    },
    /// The layer was reset and the record installed into it
    Installed {
        /// The resolution that was installed
        selection: Selection,
        /// Layer directory
        layer_path: PathBuf,
        /// Flags written to the layer metadata
        flags: LayerFlags,
        /// Time spent in the installer
        duration: Duration,
    },
}

impl BuildOutcome {
    /// The selection behind either outcome.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        match self {
            Self::Reused {
                selection,
                ..
            }
            | Self::Installed {
                selection,
                ..
            } => selection,
        }
    }

    /// The layer directory.
    #[must_use]
    pub fn layer_path(&self) -> &Path {
        match self {
            Self::Reused {
                layer_path,
                ..
            }
            | Self::Installed {
                layer_path,
                ..
            } => layer_path,
        }
    }
}

/// Runs builds with a given installer.
pub struct Build<I: DependencyInstaller = FileUriInstaller> {
    installer: I,
}

impl Default for Build<FileUriInstaller> {
    fn default() -> Self {
        Self::new(FileUriInstaller)
    }
}

impl<I: DependencyInstaller> Build<I> {
    /// A build that installs through `installer`.
    pub const fn new(installer: I) -> Self {
        Self {
            installer,
        }
    }

    /// Resolve the dependency and read the installed state, without side effects.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan names no runtime request, if any input
    /// file is invalid, or if no catalog version satisfies the request.
    pub fn select(&self, config: &BuildConfig) -> Result<Selection> {
        let requests = config.requests()?;
        if requests.is_empty() {
            return Err(ResolveError::MissingPlanEntry {
                name: DEPENDENCY_ID.to_string(),
            }
            .into());
        }

        let request = PlanEntryResolver::resolve(&requests);
        let catalog = BuildpackCatalog::load(&config.catalog_path)?;
        if request.source == VersionSource::LegacyConfigFile {
            warn_legacy_config(&catalog.buildpack.version);
        }

        let resolution = ConstraintResolver::new(&catalog)
            .resolve(DEPENDENCY_ID, &request, &config.platform)
            .with_context(|| format!("Failed to resolve {DEPENDENCY_ID} version"))?;

        let installed = match config.layer_store() {
            Some(store) => store.read_state()?,
            None => InstalledState::default(),
        };

        Ok(Selection {
            request,
            resolution,
            installed,
        })
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if no layers directory is configured, if selection
    /// fails, or if the layer cannot be reset, installed or described.
    pub fn run(&self, config: &BuildConfig) -> Result<BuildOutcome> {
        let store = config.layer_store().context("A layers directory is required to build")?;
        let selection = self.select(config)?;
        let layer_path = store.path();

        if selection.reusable() {
            tracing::info!("Reusing cached layer {}", layer_path.display());
            return Ok(BuildOutcome::Reused {
                selection,
                layer_path,
            });
        }

        let dependency = &selection.resolution.dependency;
        let layer_path = store.reset()?;
        let flags = selection.layer_flags();

        tracing::info!("Installing {} {}", dependency.id, dependency.version);
        let started = Instant::now();
        self.installer.install(dependency, &layer_path)?;
        let duration = started.elapsed();
        tracing::info!("Completed in {}ms", duration.as_millis());

        store.write(&LayerMetadata {
            flags,
            fingerprint: dependency.checksum.clone(),
            built_at: Utc::now(),
        })?;

        Ok(BuildOutcome::Installed {
            selection,
            layer_path,
            flags,
            duration,
        })
    }
}

/// The release that drops `buildpack.yml`: the next major of the buildpack.
fn legacy_removal_release(buildpack_version: &str) -> Option<String> {
    parse_version(buildpack_version).ok().map(|v| format!("v{}.0.0", v.major + 1))
}

fn warn_legacy_config(buildpack_version: &str) {
    let release = legacy_removal_release(buildpack_version)
        .map(|release| format!(" in {release}"))
        .unwrap_or_default();
    tracing::warn!(
        "Setting the .NET Framework version through buildpack.yml will be deprecated soon{}.",
        release
    );
    tracing::warn!(
        "Please specify the version through the ${} environment variable instead.",
        OVERRIDE_ENV_VAR
    );
}
