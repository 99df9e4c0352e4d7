//! Version parsing and roll-forward resolution for runtime requests.
//!
//! # Module Organization
//!
//! - [`constraints`] - Constraint parsing, the roll-forward ladder, and the
//!   [`ConstraintResolver`](constraints::ConstraintResolver)
//! - Request normalization and lenient version parsing (this module)
//!
//! # Version Specifications
//!
//! - **Exact versions**: `"6.0.5"`, `"v6.0.5"`, `"6.0.5-rc.1"`
//! - **Partial versions**: `"6.0"` and `"6"` behave as `"6.0.*"` and `"6.*"`
//! - **Wildcards**: `"6.0.*"`, `"6.0.x"`, `"*"`
//! - **Ranges**: `">=6.0.0, <7.0.0"` and other semver requirement syntax
//! - **Empty / `default`**: replaced by the catalog default version, else `"*"`
//!
//! Catalog versions are parsed leniently as well: a leading `v` is ignored and
//! missing minor/patch components are zero-filled.

use semver::Version;

use crate::core::ResolveError;

pub mod constraints;

pub use constraints::{ConstraintKind, ConstraintLadder, ConstraintResolver, Resolution, VersionConstraint};

/// The token a request uses to ask for the catalog default.
pub const DEFAULT_TOKEN: &str = "default";

/// The request matching any stable version.
pub const WILDCARD: &str = "*";

/// Whether `part` is a wildcard token (`*`, `x` or `X`).
#[must_use]
pub fn is_wildcard(part: &str) -> bool {
    matches!(part, "*" | "x" | "X")
}

/// Replace an empty or `default` request with the catalog default, or `*`.
///
/// # Examples
///
/// ```rust
/// use runtime_resolver::version::normalize_request;
///
/// assert_eq!(normalize_request("", None), "*");
/// assert_eq!(normalize_request("default", Some("6.0.*")), "6.0.*");
/// assert_eq!(normalize_request(" 6.0.1 ", Some("7.0.0")), "6.0.1");
/// ```
#[must_use]
pub fn normalize_request(requested: &str, default_version: Option<&str>) -> String {
    let trimmed = requested.trim();
    if !trimmed.is_empty() && trimmed != DEFAULT_TOKEN {
        return trimmed.to_string();
    }

    match default_version.map(str::trim) {
        Some(default) if !default.is_empty() => default.to_string(),
        _ => WILDCARD.to_string(),
    }
}

/// Split a version into its numeric core and the `-pre`/`+build` remainder.
pub(crate) fn split_core(version: &str) -> (&str, &str) {
    let at = version.find(['-', '+']).unwrap_or(version.len());
    version.split_at(at)
}

/// Parse a version, tolerating a `v` prefix and missing minor/patch parts.
///
/// # Errors
///
/// Returns [`ResolveError::MalformedVersion`] if the string is not a
/// semantic version even after zero-filling.
pub fn parse_version(input: &str) -> Result<Version, ResolveError> {
    let trimmed = input.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let (core, rest) = split_core(cleaned);

    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{rest}"),
        2 => format!("{core}.0{rest}"),
        _ => cleaned.to_string(),
    };

    Version::parse(&padded).map_err(|e| ResolveError::MalformedVersion {
        version: input.to_string(),
        reason: e.to_string(),
    })
}

/// The lowest version a request may resolve to.
///
/// Wildcard components are zero-filled: `"1.2.*"` has floor `1.2.0`. A bare
/// wildcard has no floor, and neither do operator expressions such as
/// `">=1.0.0, <2.0.0"`, whose own bounds already apply.
///
/// # Errors
///
/// Returns [`ResolveError::MalformedVersion`] if the request looks like a
/// version but does not parse as one.
pub fn version_floor(requested: &str) -> Result<Option<Version>, ResolveError> {
    let trimmed = requested.trim();
    if is_wildcard(trimmed) || trimmed.starts_with(['<', '>', '=', '^', '~']) || trimmed.contains(',') {
        return Ok(None);
    }

    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let (core, rest) = split_core(cleaned);
    let zeroed: Vec<&str> = core.split('.').map(|part| if is_wildcard(part) { "0" } else { part }).collect();

    parse_version(&format!("{}{rest}", zeroed.join("."))).map(Some)
}
