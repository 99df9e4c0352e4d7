//! Catalog lookup driven by the roll-forward ladder.

use semver::Version;
use std::cmp::Ordering;

use super::{ConstraintKind, ConstraintLadder};
use crate::catalog::{DependencyRecord, VersionCatalog};
use crate::core::ResolveError;
use crate::plan::CanonicalRequest;
use crate::version::{normalize_request, parse_version, version_floor};

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The chosen catalog record
    pub dependency: DependencyRecord,
    /// The request after default/wildcard normalization
    pub requested_version: String,
    /// The ladder rung that produced the match
    pub matched_by: ConstraintKind,
}

impl Resolution {
    /// Whether a looser rung than the request itself was needed.
    #[must_use]
    pub fn rolled_forward(&self) -> bool {
        self.matched_by != ConstraintKind::Requested
    }
}

/// Picks the highest compatible catalog version for a canonical request.
///
/// # Resolution Process
///
/// 1. Keep catalog records with the requested id that support the platform
/// 2. Normalize the request (empty/`default` become the catalog default or `*`)
/// 3. Build the [`ConstraintLadder`] for the request and its source
/// 4. Walk the ladder; a candidate passes a rung if it satisfies the rung and
///    is not lower than the requested version
/// 5. Return the highest passing candidate of the first rung with any
///
/// # Examples
///
/// ```rust,no_run
/// use runtime_resolver::catalog::BuildpackCatalog;
/// use runtime_resolver::plan::{PlanEntryResolver, PlanRequest, VersionSource};
/// use runtime_resolver::version::ConstraintResolver;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let catalog = BuildpackCatalog::load(Path::new("buildpack.toml"))?;
/// let request = PlanEntryResolver::resolve(&[PlanRequest::new(
///     "dotnet-runtime",
///     "6.0.0",
///     VersionSource::RuntimeConfigFile,
/// )]);
///
/// let resolution = ConstraintResolver::new(&catalog).resolve("dotnet-runtime", &request, "io.buildpacks.stacks.jammy")?;
/// println!("{} (rolled forward: {})", resolution.dependency.version, resolution.rolled_forward());
/// # Ok(())
/// # }
/// ```
pub struct ConstraintResolver<'a, C: VersionCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: VersionCatalog + ?Sized> ConstraintResolver<'a, C> {
    /// Create a resolver over `catalog`.
    pub const fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
        }
    }

    /// Resolve `request` to a catalog record for `platform`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MalformedVersion`] if the request or any candidate
    ///   version is not a semantic version
    /// - [`ResolveError::NoCompatibleVersion`] if no rung matches; the error
    ///   lists every candidate version, sorted
    pub fn resolve(
        &self,
        dependency_id: &str,
        request: &CanonicalRequest,
        platform: &str,
    ) -> Result<Resolution, ResolveError> {
        let requested_version =
            normalize_request(&request.requested_version, self.catalog.default_version(dependency_id));
        let ladder = ConstraintLadder::build(&requested_version, &request.source)?;
        let floor = version_floor(&requested_version)?;

        let candidates = self
            .catalog
            .dependencies(dependency_id)
            .into_iter()
            .filter(|record| record.supports(platform))
            .map(|record| parse_version(&record.version).map(|version| (version, record)))
            .collect::<Result<Vec<(Version, &DependencyRecord)>, ResolveError>>()?;

        tracing::debug!(
            "Resolving {} {} on {} against {} candidates ({})",
            dependency_id,
            requested_version,
            platform,
            candidates.len(),
            ladder
        );

        for (index, (kind, constraint)) in ladder.rungs().iter().enumerate() {
            if index == 1 {
                tracing::info!("No exact version match found; attempting version roll-forward");
            }

            let mut passing: Vec<&(Version, &DependencyRecord)> = candidates
                .iter()
                .filter(|(version, _)| constraint.matches(version))
                .filter(|(version, _)| {
                    floor.as_ref().is_none_or(|floor| version.cmp_precedence(floor) != Ordering::Less)
                })
                .collect();

            // Stable sort, so duplicates resolve to the first one in catalog order
            passing.sort_by(|(a, _), (b, _)| b.cmp_precedence(a));

            if let Some((_, record)) = passing.first() {
                tracing::info!(
                    "Selected {} version (using {}): {}",
                    dependency_id,
                    request.source.label(),
                    record.version
                );
                return Ok(Resolution {
                    dependency: DependencyRecord::clone(record),
                    requested_version,
                    matched_by: *kind,
                });
            }
        }

        let mut available: Vec<&(Version, &DependencyRecord)> = candidates.iter().collect();
        available.sort_by(|(a, _), (b, _)| a.cmp_precedence(b));

        Err(ResolveError::NoCompatibleVersion {
            dependency_id: dependency_id.to_string(),
            platform: platform.to_string(),
            requested_version,
            available_versions: available.iter().map(|(_, record)| record.version.clone()).collect(),
        })
    }
}
