//! runtime-resolver - .NET Core runtime selection for buildpacks
//!
//! Decides which runtime build an application gets, and whether the layer
//! left by a previous build can be kept:
//!
//! 1. Several mechanisms may request the runtime (environment override,
//!    `buildpack.yml`, project files, `*.runtimeconfig.json`). The
//!    [`plan::PlanEntryResolver`] reduces them to one canonical request.
//! 2. The [`version::ConstraintResolver`] finds the highest catalog version
//!    satisfying the request, rolling forward to a newer patch or minor
//!    release when the source allows it.
//! 3. The [`cache::CacheCoordinator`] compares the chosen record's checksum
//!    with the one recorded in the layer metadata to skip or redo the install.
//!
//! # Core Modules
//!
//! - [`plan`] - Version sources, plan requests and their reconciliation
//! - [`catalog`] - The `buildpack.toml` dependency catalog
//! - [`version`] - Request normalization, the roll-forward ladder, resolution
//! - [`cache`] - Layer reuse decisions and layer metadata
//!
//! ## Surrounding Modules
//! - [`detect`] - Requests from the environment and application files
//! - [`build`] - The end-to-end pipeline and the installer collaborator
//! - [`cli`] - `detect`, `resolve` and `build` subcommands
//! - [`core`] - Error types and user-facing error rendering
//! - [`constants`] - Names shared across modules
//! - [`utils`] - Filesystem helpers
//!
//! # Catalog Format (buildpack.toml)
//!
//! ```toml
//! [buildpack]
//! id = "paketo-buildpacks/dotnet-core-runtime"
//! version = "1.4.0"
//!
//! [metadata.default-versions]
//! dotnet-runtime = "6.0.*"
//!
//! [[metadata.dependencies]]
//! id = "dotnet-runtime"
//! version = "6.0.5"
//! sha256 = "..."
//! uri = "file:///cache/dotnet-runtime-6.0.5.tar.xz"
//! stacks = ["io.buildpacks.stacks.jammy"]
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Detect requests and write a plan
//! runtime-resolver detect --working-dir ./app --output plan.toml
//!
//! # Dry run: which version would be installed?
//! runtime-resolver resolve --plan plan.toml --platform io.buildpacks.stacks.jammy
//!
//! # Install (or reuse) the runtime layer
//! runtime-resolver build --plan plan.toml --platform io.buildpacks.stacks.jammy --layers ./layers
//! ```

// Core resolution
pub mod cache;
pub mod catalog;
pub mod plan;
pub mod version;

// Pipeline and interface
pub mod build;
pub mod cli;
pub mod detect;

// Supporting modules
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
