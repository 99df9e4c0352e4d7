//! Fixtures for catalogs, requests and buildpack directory layouts.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{BuildpackCatalog, DependencyRecord};
use crate::constants::DEPENDENCY_ID;
use crate::plan::{BuildPlan, CanonicalRequest, PlanRequest, VersionSource};

/// Platform every fixture record supports unless stated otherwise.
pub const TEST_PLATFORM: &str = "some-stack";

/// A `dotnet-runtime` record with a checksum and URI derived from the version.
#[must_use]
pub fn record(version: &str, platforms: &[&str]) -> DependencyRecord {
    DependencyRecord {
        id: DEPENDENCY_ID.to_string(),
        version: version.to_string(),
        checksum: format!("sha256:{DEPENDENCY_ID}-{version}"),
        uri: format!("file:///deps/{DEPENDENCY_ID}-{version}.tar.xz"),
        platforms: platforms.iter().map(ToString::to_string).collect(),
    }
}

/// An in-memory catalog of `dotnet-runtime` versions on [`TEST_PLATFORM`].
#[must_use]
pub fn catalog(versions: &[&str]) -> BuildpackCatalog {
    BuildpackCatalog::new(versions.iter().map(|v| record(v, &[TEST_PLATFORM])).collect())
}

/// A canonical request with both layer flags unset.
#[must_use]
pub fn canonical(version: &str, source: VersionSource) -> CanonicalRequest {
    CanonicalRequest {
        dependency_name: DEPENDENCY_ID.to_string(),
        requested_version: version.to_string(),
        source,
        wants_build_time: false,
        wants_launch_time: false,
    }
}

/// Write a build plan for `requests` to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_plan(path: &Path, requests: &[PlanRequest]) -> Result<()> {
    let plan = BuildPlan::from_requests(requests).to_toml_string().context("serializing plan")?;
    fs::write(path, plan).with_context(|| format!("writing {}", path.display()))
}

/// Render records as a `buildpack.toml` document.
#[must_use]
pub fn catalog_toml(buildpack_version: &str, records: &[DependencyRecord]) -> String {
    let mut out = format!(
        "api = \"0.2\"\n\n[buildpack]\nid = \"org.some-org.dotnet-core-runtime\"\nname = \"Dotnet Core Runtime\"\nversion = \"{buildpack_version}\"\n\n[metadata]\n"
    );
    for record in records {
        let platforms: Vec<String> = record.platforms.iter().map(|p| format!("\"{p}\"")).collect();
        out.push_str(&format!(
            "\n[[metadata.dependencies]]\nid = \"{}\"\nversion = \"{}\"\nchecksum = \"{}\"\nuri = \"{}\"\nplatforms = [{}]\n",
            record.id,
            record.version,
            record.checksum,
            record.uri,
            platforms.join(", ")
        ));
    }
    out
}

/// Artifacts written by [`BuildpackFixture::with_artifact`] live here.
const ARTIFACT_DIR: &str = "artifacts";

/// A buildpack directory with a catalog whose URIs point at real local files.
pub struct BuildpackFixture {
    root: PathBuf,
    version: String,
    records: Vec<DependencyRecord>,
}

impl BuildpackFixture {
    /// Start a fixture rooted at `root` (created if missing).
    pub fn new(root: &Path, buildpack_version: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            version: buildpack_version.to_string(),
            records: Vec::new(),
        }
    }

    /// Add a record for `version` backed by an artifact file containing `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be written.
    pub fn with_artifact(mut self, version: &str, platforms: &[&str], contents: &str) -> Result<Self> {
        let dir = self.root.join(ARTIFACT_DIR);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        let file = dir.join(format!("{DEPENDENCY_ID}-{version}.tar.xz"));
        fs::write(&file, contents).with_context(|| format!("writing {}", file.display()))?;

        let mut record = record(version, platforms);
        record.uri = format!("file://{}", file.display());
        self.records.push(record);
        Ok(self)
    }

    /// Add a record without an artifact on disk.
    #[must_use]
    pub fn with_record(mut self, record: DependencyRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Write `buildpack.toml` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    pub fn write(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).with_context(|| format!("creating {}", self.root.display()))?;
        let path = self.root.join(crate::constants::CATALOG_FILE);
        fs::write(&path, catalog_toml(&self.version, &self.records))
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}
