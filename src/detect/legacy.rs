//! The deprecated `buildpack.yml` configuration file.
//!
//! ```yaml
//! dotnet-framework:
//!   version: "6.0.*"
//! ```

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::ResolveError;

#[derive(Debug, Default, Deserialize)]
struct LegacyConfig {
    #[serde(default, rename = "dotnet-framework")]
    dotnet_framework: FrameworkSection,
}

#[derive(Debug, Default, Deserialize)]
struct FrameworkSection {
    #[serde(default)]
    version: Option<String>,
}

/// Read the framework version from a `buildpack.yml` file.
///
/// Returns `Ok(None)` when the file is absent, empty, or declares no version.
///
/// # Errors
///
/// Returns [`ResolveError::LegacyConfigError`] if the file cannot be read or
/// is not valid YAML.
pub fn parse_version(path: &Path) -> Result<Option<String>, ResolveError> {
    let config_error = |reason: String| ResolveError::LegacyConfigError {
        path: path.display().to_string(),
        reason,
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(config_error(e.to_string())),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let config: LegacyConfig = serde_yaml::from_str(&content).map_err(|e| config_error(e.to_string()))?;

    Ok(config.dotnet_framework.version.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}
