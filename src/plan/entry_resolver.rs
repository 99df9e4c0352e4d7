//! Reconciliation of competing plan requests into one canonical request.

use std::cmp::Reverse;
use std::fmt::Write as _;

use super::{CanonicalRequest, PlanRequest};

/// Collapses the requests for one dependency into a [`CanonicalRequest`].
///
/// The resolver is stateless; every operation is a pure function of its input
/// slice, which is never reordered in place.
pub struct PlanEntryResolver;

impl PlanEntryResolver {
    /// Order requests by descending source priority.
    ///
    /// The sort is stable, so requests of equal priority keep their input order.
    #[must_use]
    pub fn prioritize(requests: &[PlanRequest]) -> Vec<&PlanRequest> {
        let mut ordered: Vec<&PlanRequest> = requests.iter().collect();
        ordered.sort_by_key(|request| Reverse(request.source.priority()));
        ordered
    }

    /// Pick the winning request and OR-merge the layer flags of all requests.
    ///
    /// The priority-ordered candidate list is logged before returning.
    ///
    /// # Panics
    ///
    /// Panics if `requests` is empty. Callers only resolve dependencies that
    /// some plan entry declared, so an empty slice is a programming error.
    #[must_use]
    pub fn resolve(requests: &[PlanRequest]) -> CanonicalRequest {
        assert!(!requests.is_empty(), "plan entry resolution requires at least one request");

        let ordered = Self::prioritize(requests);
        tracing::info!("{}", format_candidates(&ordered));

        let winner = ordered[0];
        CanonicalRequest {
            dependency_name: winner.dependency_name.clone(),
            requested_version: winner.requested_version.clone(),
            source: winner.source.clone(),
            wants_build_time: requests.iter().any(|r| r.wants_build_time),
            wants_launch_time: requests.iter().any(|r| r.wants_launch_time),
        }
    }
}

/// Render the candidate listing, one `label -> "version"` line per request.
///
/// Labels are padded to the widest one so the arrows line up.
#[must_use]
pub fn format_candidates(ordered: &[&PlanRequest]) -> String {
    let width = ordered.iter().map(|r| r.source.label().len()).max().unwrap_or(0);

    let mut out = String::from("Candidate version sources (in priority order):");
    for request in ordered {
        let _ = write!(
            out,
            "\n  {:<width$} -> \"{}\"",
            request.source.label(),
            request.requested_version
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::VersionSource;

    fn request(version: &str, source: VersionSource) -> PlanRequest {
        PlanRequest::new("dotnet-runtime", version, source)
    }

    #[test]
    fn test_legacy_config_beats_unknown() {
        let requests = vec![
            request("other-version", VersionSource::Unknown),
            request("buildpack-yml-version", VersionSource::LegacyConfigFile),
        ];

        let canonical = PlanEntryResolver::resolve(&requests);
        assert_eq!(canonical.requested_version, "buildpack-yml-version");
        assert_eq!(canonical.source, VersionSource::LegacyConfigFile);
        assert!(!canonical.wants_build_time);
        assert!(!canonical.wants_launch_time);
    }

    #[test]
    fn test_override_wins_regardless_of_order() {
        let base = vec![
            request("1.0.0", VersionSource::RuntimeConfigFile),
            request("2.0.0", VersionSource::LegacyConfigFile),
            request("3.0.0", VersionSource::ExplicitOverrideEnv),
            request("4.0.0", VersionSource::Unknown),
        ];

        for rotation in 0..base.len() {
            let mut requests = base.clone();
            requests.rotate_left(rotation);
            let canonical = PlanEntryResolver::resolve(&requests);
            assert_eq!(canonical.source, VersionSource::ExplicitOverrideEnv);
            assert_eq!(canonical.requested_version, "3.0.0");
        }
    }

    #[test]
    fn test_equal_priority_keeps_input_order() {
        let requests = vec![
            request("6.0.0", VersionSource::RuntimeConfigFile),
            request("6.0.1", VersionSource::ProjectManifest("app.csproj".into())),
        ];
        let canonical = PlanEntryResolver::resolve(&requests);
        assert_eq!(canonical.source, VersionSource::RuntimeConfigFile);

        let requests = vec![
            request("6.0.1", VersionSource::ProjectManifest("app.csproj".into())),
            request("6.0.0", VersionSource::RuntimeConfigFile),
        ];
        let canonical = PlanEntryResolver::resolve(&requests);
        assert_eq!(canonical.source, VersionSource::ProjectManifest("app.csproj".into()));
    }

    #[test]
    fn test_flags_are_or_merged_across_all_requests() {
        let requests = vec![
            request("2.5.x", VersionSource::Unknown).launch(true),
            request("2.5.0", VersionSource::RuntimeConfigFile),
            request("2.5.2", VersionSource::ExplicitOverrideEnv).build(true),
        ];

        let canonical = PlanEntryResolver::resolve(&requests);
        assert_eq!(
            canonical,
            CanonicalRequest {
                dependency_name: "dotnet-runtime".to_string(),
                requested_version: "2.5.2".to_string(),
                source: VersionSource::ExplicitOverrideEnv,
                wants_build_time: true,
                wants_launch_time: true,
            }
        );
    }

    #[test]
    fn test_flags_false_when_no_request_sets_them() {
        let requests = vec![
            request("1.0.0", VersionSource::RuntimeConfigFile),
            request("1.0.1", VersionSource::Unknown),
        ];
        let canonical = PlanEntryResolver::resolve(&requests);
        assert!(!canonical.wants_build_time);
        assert!(!canonical.wants_launch_time);
    }

    #[test]
    fn test_resolve_is_idempotent_and_does_not_reorder_input() {
        let requests = vec![
            request("1.0.0", VersionSource::Unknown).build(true),
            request("1.1.0", VersionSource::LegacyConfigFile),
        ];
        let snapshot = requests.clone();

        let first = PlanEntryResolver::resolve(&requests);
        let second = PlanEntryResolver::resolve(&requests);
        assert_eq!(first, second);
        assert_eq!(requests, snapshot);
    }

    #[test]
    #[should_panic(expected = "at least one request")]
    fn test_empty_requests_panic() {
        let _ = PlanEntryResolver::resolve(&[]);
    }

    #[test]
    fn test_format_candidates_aligns_labels() {
        let requests = vec![
            request("other-version", VersionSource::Unknown),
            request("buildpack-yml-version", VersionSource::LegacyConfigFile),
        ];
        let ordered = PlanEntryResolver::prioritize(&requests);

        assert_eq!(
            format_candidates(&ordered),
            "Candidate version sources (in priority order):\n  \
             buildpack.yml -> \"buildpack-yml-version\"\n  \
             <unknown>     -> \"other-version\""
        );
    }
}
