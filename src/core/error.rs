//! Error handling for runtime resolution
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`ResolveError`]) for everything the library can fail on
//! 2. **User-friendly rendering** ([`ErrorContext`]) with actionable suggestions for the CLI
//!
//! # Error Categories
//!
//! - **Resolution**: [`ResolveError::MalformedVersion`], [`ResolveError::NoCompatibleVersion`]
//! - **Inputs**: [`ResolveError::CatalogReadError`], [`ResolveError::PlanReadError`],
//!   [`ResolveError::LegacyConfigError`], [`ResolveError::RuntimeConfigError`],
//!   [`ResolveError::AmbiguousRuntimeConfig`], [`ResolveError::MissingPlanEntry`]
//! - **Installation**: [`ResolveError::InstallFailed`], [`ResolveError::UnsupportedUri`]
//!
//! None of these are recovered locally. The roll-forward ladder is the only
//! retry the resolver performs; every error aborts the build.
//!
//! # Examples
//!
//! ```rust,no_run
//! use runtime_resolver::core::{ResolveError, user_friendly_error};
//!
//! let err = ResolveError::MalformedVersion {
//!     version: "invalid-version".to_string(),
//!     reason: "unexpected character 'i'".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type for runtime resolution and layer installation.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A requested or cataloged version string is not valid semantic-version syntax.
    #[error("Invalid semantic version '{version}': {reason}")]
    MalformedVersion {
        /// The offending version string, as written
        version: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Nothing in the catalog satisfied any constraint of the roll-forward ladder.
    ///
    /// `available_versions` lists every version the catalog held for the
    /// dependency on the platform, sorted, even though none of them matched.
    #[error(
        "failed to satisfy \"{dependency_id}\" dependency for platform \"{platform}\" with version constraint \"{requested_version}\": no compatible versions. Supported versions are: [{}]",
        .available_versions.join(", ")
    )]
    NoCompatibleVersion {
        /// Dependency identifier that was looked up
        dependency_id: String,
        /// Target platform identifier
        platform: String,
        /// The (normalized) version that was requested
        requested_version: String,
        /// Every version known for this id and platform
        available_versions: Vec<String>,
    },

    /// The dependency catalog document could not be read or decoded.
    #[error("Failed to read dependency catalog {path}: {reason}")]
    CatalogReadError {
        /// Catalog file path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The build plan document could not be read or decoded.
    #[error("Failed to read build plan {path}: {reason}")]
    PlanReadError {
        /// Plan file path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// No plan entry names the dependency this tool provides.
    #[error("No build plan entry requires '{name}'")]
    MissingPlanEntry {
        /// Dependency name that was looked for
        name: String,
    },

    /// The legacy configuration file exists but is not valid.
    #[error("Invalid legacy configuration file {path}: {reason}")]
    LegacyConfigError {
        /// File path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// A runtime descriptor exists but is not valid JSON.
    #[error("Unable to parse runtime config {path}: {reason}")]
    RuntimeConfigError {
        /// File path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// More than one runtime descriptor was found in the application root.
    #[error("Multiple *.runtimeconfig.json files present: {}", .paths.join(", "))]
    AmbiguousRuntimeConfig {
        /// Every matching file
        paths: Vec<String>,
    },

    /// The installer collaborator reported a failure.
    #[error("Failed to install {id} {version}: {reason}")]
    InstallFailed {
        /// Dependency identifier
        id: String,
        /// Dependency version
        version: String,
        /// Underlying cause
        reason: String,
    },

    /// The artifact URI uses a scheme the offline installer cannot handle.
    #[error("Unsupported artifact URI '{uri}': only file:// sources can be installed offline")]
    UnsupportedUri {
        /// The artifact URI from the catalog
        uri: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An error message paired with optional details and a suggestion for the user.
///
/// Produced by [`user_friendly_error`] and rendered by [`ErrorContext::display`].
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Full error message including the context chain
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: message in red, details in yellow,
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// The message keeps the whole `anyhow` context chain. Suggestions are chosen
/// from the first [`ResolveError`] found in the chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format!("{error:#}");

    let Some(resolve_error) = error.chain().find_map(|e| e.downcast_ref::<ResolveError>()) else {
        return ErrorContext::new(message);
    };

    let ctx = ErrorContext::new(message);
    match resolve_error {
        ResolveError::MalformedVersion {
            ..
        } => ctx
            .with_suggestion("Use a semantic version such as 6.0.1, a wildcard such as 6.0.*, or '*'")
            .with_details("Both requested versions and catalog entries must follow semantic versioning"),
        ResolveError::NoCompatibleVersion {
            ..
        } => ctx
            .with_suggestion(
                "Request one of the supported versions, or unset the override so roll-forward can apply",
            )
            .with_details(
                "Versions from the environment override and buildpack.yml are matched exactly and never roll forward",
            ),
        ResolveError::CatalogReadError {
            ..
        } => ctx.with_suggestion("Check that buildpack.toml exists and is valid TOML"),
        ResolveError::PlanReadError {
            ..
        } => ctx.with_suggestion("Check the build plan TOML; run the detect command to generate one"),
        ResolveError::MissingPlanEntry {
            ..
        } => ctx.with_details("The build plan does not require this dependency, so there is nothing to install"),
        ResolveError::LegacyConfigError {
            ..
        } => ctx.with_suggestion(
            "Fix the YAML syntax, or set $BP_DOTNET_FRAMEWORK_VERSION instead of using buildpack.yml",
        ),
        ResolveError::RuntimeConfigError {
            ..
        } => ctx.with_suggestion("Check the runtimeconfig.json file for JSON syntax errors"),
        ResolveError::AmbiguousRuntimeConfig {
            ..
        } => ctx.with_suggestion("Keep exactly one *.runtimeconfig.json in the application root"),
        ResolveError::UnsupportedUri {
            ..
        } => ctx.with_details("Artifacts must be available locally; downloading is not supported"),
        ResolveError::InstallFailed {
            ..
        }
        | ResolveError::Io(_) => ctx.with_suggestion("Check that the layers directory is writable"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_no_compatible_version_message_lists_versions() {
        let err = ResolveError::NoCompatibleVersion {
            dependency_id: "dotnet-runtime".to_string(),
            platform: "some-stack".to_string(),
            requested_version: "2.0.0".to_string(),
            available_versions: vec!["1.2.3".to_string(), "1.2.4".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "failed to satisfy \"dotnet-runtime\" dependency for platform \"some-stack\" with version constraint \"2.0.0\": no compatible versions. Supported versions are: [1.2.3, 1.2.4]"
        );
    }

    #[test]
    fn test_no_compatible_version_message_empty_list() {
        let err = ResolveError::NoCompatibleVersion {
            dependency_id: "random-ID".to_string(),
            platform: "some-stack".to_string(),
            requested_version: "1.2.3".to_string(),
            available_versions: vec![],
        };

        assert!(err.to_string().ends_with("Supported versions are: []"));
    }

    #[test]
    fn test_user_friendly_error_keeps_context_chain() {
        let err = Err::<(), _>(ResolveError::MissingPlanEntry {
            name: "dotnet-runtime".to_string(),
        })
        .context("Failed to resolve plan")
        .unwrap_err();

        let ctx = user_friendly_error(err);
        assert!(ctx.message.starts_with("Failed to resolve plan: "));
        assert!(ctx.message.contains("dotnet-runtime"));
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_user_friendly_error_plain_anyhow() {
        let ctx = user_friendly_error(anyhow::anyhow!("something odd"));
        assert_eq!(ctx.message, "something odd");
        assert!(ctx.suggestion.is_none());
        assert!(ctx.details.is_none());
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new("boom").with_details("why").with_suggestion("fix it");
        assert_eq!(ctx.to_string(), "boom\nDetails: why\nSuggestion: fix it");
    }
}
