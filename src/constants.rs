//! Names shared across detection, resolution and layer management.
//!
//! The values follow the Cloud Native Buildpacks conventions of the
//! .NET Core runtime buildpack: the plan entry name, the override
//! variable, the legacy configuration file and the layer name.

/// Build plan entry name and catalog dependency id provided by this tool.
pub const DEPENDENCY_ID: &str = "dotnet-runtime";

/// Environment variable that pins the framework version and forbids roll-forward.
pub const OVERRIDE_ENV_VAR: &str = "BP_DOTNET_FRAMEWORK_VERSION";

/// Deprecated per-application configuration file.
pub const LEGACY_CONFIG_FILE: &str = "buildpack.yml";

/// Source label used for versions taken from a generated runtime descriptor.
pub const RUNTIME_CONFIG_LABEL: &str = "runtimeconfig.json";

/// Glob (relative to the application root) locating runtime descriptors.
pub const RUNTIME_CONFIG_GLOB: &str = "*.runtimeconfig.json";

/// Catalog document shipped with the buildpack.
pub const CATALOG_FILE: &str = "buildpack.toml";

/// Name of the layer the runtime is installed into.
pub const LAYER_NAME: &str = "dotnet-core-runtime";

/// Layer metadata key holding the installed artifact fingerprint.
pub const FINGERPRINT_KEY: &str = "dependency-sha";

/// Layer metadata key holding the RFC 3339 install timestamp.
pub const BUILT_AT_KEY: &str = "built_at";

/// Exit code signalling "this buildpack does not apply" from detect.
pub const DETECT_FAIL_CODE: u8 = 100;
