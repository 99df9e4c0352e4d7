//! The ordered list of constraints tried for one request.

use semver::VersionReq;
use std::fmt;

use super::VersionConstraint;
use crate::core::ResolveError;
use crate::plan::VersionSource;

/// Which rung of the ladder a constraint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// The request as written
    Requested,
    /// Same `major.minor`, any patch
    SameMinor,
    /// Same major, any minor and patch
    SameMajor,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Requested => "requested",
            Self::SameMinor => "same minor",
            Self::SameMajor => "same major",
        })
    }
}

/// Constraints to try in order; the first that matches anything wins.
///
/// The ladder is plain data so it can be inspected without a catalog.
///
/// # Examples
///
/// ```rust
/// use runtime_resolver::plan::VersionSource;
/// use runtime_resolver::version::{ConstraintKind, ConstraintLadder};
///
/// let ladder = ConstraintLadder::build("6.0.1", &VersionSource::RuntimeConfigFile)?;
/// let kinds: Vec<_> = ladder.rungs().iter().map(|(kind, _)| *kind).collect();
/// assert_eq!(kinds, [ConstraintKind::Requested, ConstraintKind::SameMinor, ConstraintKind::SameMajor]);
///
/// let pinned = ConstraintLadder::build("6.0.1", &VersionSource::ExplicitOverrideEnv)?;
/// assert_eq!(pinned.rungs().len(), 1);
/// # Ok::<(), runtime_resolver::core::ResolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintLadder {
    rungs: Vec<(ConstraintKind, VersionConstraint)>,
}

impl ConstraintLadder {
    /// Build the ladder for a normalized request.
    ///
    /// Roll-forward rungs are added only when the request is a fully
    /// qualified version and `source` permits roll-forward.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedVersion`] if `requested` does not parse.
    pub fn build(requested: &str, source: &VersionSource) -> Result<Self, ResolveError> {
        let requested_constraint = VersionConstraint::parse(requested)?;

        let roll_forward = match &requested_constraint {
            VersionConstraint::Exact(version) if source.permits_roll_forward() => Some((
                wildcard(&format!("{}.{}.*", version.major, version.minor))?,
                wildcard(&format!("{}.*", version.major))?,
            )),
            _ => None,
        };

        let mut rungs = vec![(ConstraintKind::Requested, requested_constraint)];
        if let Some((same_minor, same_major)) = roll_forward {
            rungs.push((ConstraintKind::SameMinor, same_minor));
            rungs.push((ConstraintKind::SameMajor, same_major));
        }

        Ok(Self {
            rungs,
        })
    }

    /// The rungs in the order they are tried.
    #[must_use]
    pub fn rungs(&self) -> &[(ConstraintKind, VersionConstraint)] {
        &self.rungs
    }
}

fn wildcard(expr: &str) -> Result<VersionConstraint, ResolveError> {
    VersionReq::parse(expr).map(VersionConstraint::Requirement).map_err(|e| {
        ResolveError::MalformedVersion {
            version: expr.to_string(),
            reason: e.to_string(),
        }
    })
}

impl fmt::Display for ConstraintLadder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.rungs.iter().map(|(_, c)| c.to_string()).collect();
        f.write_str(&rendered.join(" -> "))
    }
}
