//! Version constraints and the roll-forward ladder.
//!
//! A request is turned into an ordered [`ConstraintLadder`]: the exact
//! constraint first, then (for fully qualified requests from sources that
//! allow it) the same-minor and same-major wildcards. The
//! [`ConstraintResolver`] walks the ladder against the catalog and stops at
//! the first rung with a match.
//!
//! # Constraint Syntax Reference
//!
//! | Syntax | Parsed as | Matches |
//! |--------|-----------|---------|
//! | `1.2.3` | [`VersionConstraint::Exact`] | `1.2.3` only |
//! | `1.2.*`, `1.2.x`, `1.2` | [`VersionConstraint::Requirement`] | stable `1.2.x` |
//! | `1.*`, `1` | [`VersionConstraint::Requirement`] | stable `1.x.x` |
//! | `>=1.0.0, <2.0.0` | [`VersionConstraint::Requirement`] | the range |
//! | `*` | [`VersionConstraint::Any`] | any stable version |
//!
//! Pre-release versions follow semver precedence and only match a constraint
//! that names a pre-release on the same `major.minor.patch`.

use semver::{Version, VersionReq};
use std::cmp::Ordering;
use std::fmt;

use super::{is_wildcard, parse_version, split_core};
use crate::core::ResolveError;

pub mod ladder;
pub mod resolver;

pub use ladder::{ConstraintKind, ConstraintLadder};
pub use resolver::{ConstraintResolver, Resolution};

/// A predicate over semantic versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Exactly this version (build metadata ignored)
    Exact(Version),
    /// A semver requirement: wildcard, partial, or range
    Requirement(VersionReq),
    /// Any stable version
    Any,
}

impl VersionConstraint {
    /// Parse a constraint string.
    ///
    /// A fully qualified version with no operator is an exact match. Partial
    /// versions without an operator become wildcards (`"1.2"` is `"1.2.*"`),
    /// unlike the caret default of plain semver requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedVersion`] if the string is neither a
    /// version nor a valid requirement.
    pub fn parse(constraint: &str) -> Result<Self, ResolveError> {
        let trimmed = constraint.trim();
        if is_wildcard(trimmed) {
            return Ok(Self::Any);
        }

        let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (core, rest) = split_core(cleaned);
        let parts: Vec<&str> = core.split('.').collect();
        let version_like = parts.len() <= 3
            && parts
                .iter()
                .all(|p| is_wildcard(p) || (!p.is_empty() && p.chars().all(|c| c.is_ascii_digit())));

        if version_like {
            let has_wildcard = parts.iter().any(|p| is_wildcard(p));
            if parts.len() == 3 && !has_wildcard {
                return parse_version(cleaned).map(Self::Exact);
            }
            if rest.is_empty() {
                let expr = if has_wildcard {
                    core.to_string()
                } else {
                    format!("{core}.*")
                };
                return parse_requirement(constraint, &expr);
            }
        }

        parse_requirement(constraint, trimmed)
    }

    /// Whether `version` satisfies this constraint.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Exact(v) => v.cmp_precedence(version) == Ordering::Equal,
            Self::Requirement(req) => req.matches(version),
            Self::Any => version.pre.is_empty(),
        }
    }

    /// Whether this is an exact, fully qualified version.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

fn parse_requirement(original: &str, expr: &str) -> Result<VersionConstraint, ResolveError> {
    VersionReq::parse(expr).map(VersionConstraint::Requirement).map_err(|e| {
        ResolveError::MalformedVersion {
            version: original.to_string(),
            reason: e.to_string(),
        }
    })
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) => write!(f, "{version}"),
            Self::Requirement(req) => write!(f, "{req}"),
            Self::Any => f.write_str("*"),
        }
    }
}
