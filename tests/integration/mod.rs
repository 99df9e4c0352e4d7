//! CLI integration tests for runtime-resolver
//!
//! Each test builds a scratch application, buildpack and layers directory in
//! a temp dir and drives the compiled binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **detect**: plan generation and the "does not apply" exit code
//! - **resolve**: version selection, roll-forward and error rendering
//! - **build**: installs and layer reuse across runs

mod build;
mod detect;
mod resolve;

use assert_cmd::Command;
use runtime_resolver::catalog::DependencyRecord;
use runtime_resolver::plan::PlanRequest;
use runtime_resolver::test_utils::fixtures::{BuildpackFixture, TEST_PLATFORM, record, write_plan};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that must not leak from the host into a test run.
const ISOLATED_VARS: &[&str] = &[
    "BP_DOTNET_FRAMEWORK_VERSION",
    "CNB_BUILDPACK_DIR",
    "CNB_STACK_ID",
    "CNB_LAYERS_DIR",
    "CNB_BP_PLAN_PATH",
    "RUST_LOG",
];

/// A scratch application, buildpack and layers directory.
pub struct TestEnv {
    temp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        Self {
            temp,
        }
    }

    pub fn app_dir(&self) -> PathBuf {
        self.temp.path().join("app")
    }

    pub fn buildpack_dir(&self) -> PathBuf {
        self.temp.path().join("buildpack")
    }

    pub fn layers_dir(&self) -> PathBuf {
        self.temp.path().join("layers")
    }

    pub fn plan_path(&self) -> PathBuf {
        self.temp.path().join("plan.toml")
    }

    /// Write a catalog of records without artifacts.
    pub fn with_catalog(self, versions: &[&str]) -> Self {
        let mut fixture = BuildpackFixture::new(&self.buildpack_dir(), "1.4.0");
        for version in versions {
            fixture = fixture.with_record(record(version, &[TEST_PLATFORM]));
        }
        fixture.write().unwrap();
        self
    }

    /// Write a catalog whose records point at real local artifacts.
    pub fn with_installable_catalog(self, versions: &[&str]) -> Self {
        let mut fixture = BuildpackFixture::new(&self.buildpack_dir(), "1.4.0");
        for version in versions {
            fixture = fixture.with_artifact(version, &[TEST_PLATFORM], &format!("runtime {version}")).unwrap();
        }
        fixture.write().unwrap();
        self
    }

    pub fn with_plan(self, requests: &[PlanRequest]) -> Self {
        write_plan(&self.plan_path(), requests).unwrap();
        self
    }

    pub fn with_app_file(self, name: &str, content: &str) -> Self {
        fs::write(self.app_dir().join(name), content).unwrap();
        self
    }

    pub fn layer_metadata(&self) -> PathBuf {
        self.layers_dir().join("dotnet-core-runtime.toml")
    }

    /// The binary with a clean environment and the buildpack/platform set.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("runtime-resolver").unwrap();
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("CNB_BUILDPACK_DIR", self.buildpack_dir())
            .env("CNB_STACK_ID", TEST_PLATFORM)
            .env("NO_COLOR", "1")
            .current_dir(self.temp.path());
        cmd
    }
}

pub fn runtime_record(version: &str) -> DependencyRecord {
    record(version, &[TEST_PLATFORM])
}

pub fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
