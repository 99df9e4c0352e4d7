//! Test utilities for runtime resolution
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] sets up a tracing subscriber once per process
//! - [`fixtures`] builds catalogs, requests and on-disk buildpack layouts
//!
//! # Example
//!
//! ```rust,ignore
//! use runtime_resolver::test_utils::fixtures::{TEST_PLATFORM, canonical, catalog};
//! use runtime_resolver::plan::VersionSource;
//! use runtime_resolver::version::ConstraintResolver;
//!
//! let catalog = catalog(&["1.2.3", "1.2.4"]);
//! let request = canonical("1.2.0", VersionSource::RuntimeConfigFile);
//! let resolution = ConstraintResolver::new(&catalog)
//!     .resolve("dotnet-runtime", &request, TEST_PLATFORM)
//!     .unwrap();
//! assert_eq!(resolution.dependency.version, "1.2.4");
//! ```

pub mod fixtures;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, else `RUST_LOG` if set; otherwise logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
