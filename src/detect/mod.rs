//! Detection: which mechanisms ask for the runtime, and at what version.
//!
//! Three sources are consulted, in this order:
//! 1. `$BP_DOTNET_FRAMEWORK_VERSION`, when set (even to an empty string)
//! 2. `buildpack.yml`, when it declares `dotnet-framework.version`
//! 3. a single `*.runtimeconfig.json` declaring a shared framework; this
//!    request is marked as needed at launch time
//!
//! The resulting requests become the build plan handed to the build step.

pub mod legacy;
pub mod runtime_config;

use std::path::Path;

use crate::constants::{DEPENDENCY_ID, LEGACY_CONFIG_FILE, OVERRIDE_ENV_VAR};
use crate::core::ResolveError;
use crate::plan::{PlanRequest, VersionSource};

/// Collect the runtime requests for the application in `working_dir`.
///
/// `env` looks up environment variables, so callers and tests can supply
/// something other than the process environment.
///
/// # Errors
///
/// Returns an error if `buildpack.yml` or the runtime descriptor exists but is
/// invalid, or if several runtime descriptors are present.
pub fn detect<F>(working_dir: &Path, env: F) -> Result<Vec<PlanRequest>, ResolveError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut requests = Vec::new();

    if let Some(version) = env(OVERRIDE_ENV_VAR) {
        tracing::debug!("{} is set to {:?}", OVERRIDE_ENV_VAR, version);
        requests.push(PlanRequest::new(DEPENDENCY_ID, version, VersionSource::ExplicitOverrideEnv));
    }

    if let Some(version) = legacy::parse_version(&working_dir.join(LEGACY_CONFIG_FILE))? {
        tracing::debug!("{} requests version {}", LEGACY_CONFIG_FILE, version);
        requests.push(PlanRequest::new(DEPENDENCY_ID, version, VersionSource::LegacyConfigFile));
    }

    if let Some(path) = runtime_config::find(working_dir)? {
        if let Some(framework) = runtime_config::parse(&path)? {
            tracing::debug!("{} references {} {}", path.display(), framework.name, framework.version);
            requests.push(
                PlanRequest::new(DEPENDENCY_ID, framework.version, VersionSource::RuntimeConfigFile)
                    .launch(true),
            );
        }
    }

    Ok(requests)
}

/// [`detect`] against the process environment.
///
/// # Errors
///
/// See [`detect`].
pub fn detect_from_env(working_dir: &Path) -> Result<Vec<PlanRequest>, ResolveError> {
    detect(working_dir, |name| std::env::var(name).ok())
}
