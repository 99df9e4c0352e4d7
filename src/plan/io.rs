//! Reading and writing build plan documents.
//!
//! A build plan is a TOML document with one `[[entries]]` table per request.
//! Request details live in free-form metadata:
//!
//! ```toml
//! [[entries]]
//! name = "dotnet-runtime"
//!
//! [entries.metadata]
//! version = "6.0.0"
//! version-source = "runtimeconfig.json"
//! launch = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{PlanRequest, VersionSource};
use crate::core::ResolveError;

const VERSION_KEY: &str = "version";
const SOURCE_KEY: &str = "version-source";
const BUILD_KEY: &str = "build";
const LAUNCH_KEY: &str = "launch";

/// A build plan: the ordered entries contributed by detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Plan entries in declaration order
    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

/// A single named plan entry with untyped metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Dependency name
    pub name: String,
    /// Free-form metadata (`version`, `version-source`, `build`, `launch`)
    #[serde(default)]
    pub metadata: toml::Table,
}

impl PlanEntry {
    /// Interpret the metadata as a [`PlanRequest`].
    ///
    /// Missing or mistyped keys fall back to an empty version, an unknown
    /// source and unset flags.
    #[must_use]
    pub fn to_request(&self) -> PlanRequest {
        let text = |key: &str| self.metadata.get(key).and_then(toml::Value::as_str);
        let flag = |key: &str| self.metadata.get(key).and_then(toml::Value::as_bool) == Some(true);

        PlanRequest::new(
            self.name.clone(),
            text(VERSION_KEY).unwrap_or_default(),
            VersionSource::from_label(text(SOURCE_KEY)),
        )
        .build(flag(BUILD_KEY))
        .launch(flag(LAUNCH_KEY))
    }

    /// Build an entry whose metadata describes `request`.
    ///
    /// Flags are written only when set, matching what detection emits.
    #[must_use]
    pub fn from_request(request: &PlanRequest) -> Self {
        let mut metadata = toml::Table::new();
        metadata.insert(VERSION_KEY.into(), request.requested_version.clone().into());
        if let Some(label) = request.source.metadata_label() {
            metadata.insert(SOURCE_KEY.into(), label.into());
        }
        if request.wants_build_time {
            metadata.insert(BUILD_KEY.into(), true.into());
        }
        if request.wants_launch_time {
            metadata.insert(LAUNCH_KEY.into(), true.into());
        }

        Self {
            name: request.dependency_name.clone(),
            metadata,
        }
    }
}

impl BuildPlan {
    /// Build a plan from requests, one entry each, preserving order.
    #[must_use]
    pub fn from_requests(requests: &[PlanRequest]) -> Self {
        Self {
            entries: requests.iter().map(PlanEntry::from_request).collect(),
        }
    }

    /// Load a plan from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::PlanReadError`] if the file cannot be read or
    /// is not a valid plan document.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let read_error = |reason: String| ResolveError::PlanReadError {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| read_error(e.to_string()))
    }

    /// Serialize the plan as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Requests for `name`, in plan order.
    #[must_use]
    pub fn requests_for(&self, name: &str) -> Vec<PlanRequest> {
        self.entries.iter().filter(|e| e.name == name).map(PlanEntry::to_request).collect()
    }
}
