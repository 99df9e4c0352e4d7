//! Installing a resolved dependency into a layer directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::DependencyRecord;
use crate::core::ResolveError;

const FILE_SCHEME: &str = "file://";

/// Places a dependency's artifact into a layer.
pub trait DependencyInstaller {
    /// Install `dependency` into the (empty) directory `layer_path`.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`ResolveError::InstallFailed`] or
    /// [`ResolveError::UnsupportedUri`].
    fn install(&self, dependency: &DependencyRecord, layer_path: &Path) -> Result<(), ResolveError>;
}

impl<T: DependencyInstaller + ?Sized> DependencyInstaller for &T {
    fn install(&self, dependency: &DependencyRecord, layer_path: &Path) -> Result<(), ResolveError> {
        (**self).install(dependency, layer_path)
    }
}

/// Offline installer for artifacts already on the local filesystem.
///
/// The artifact named by a `file://` URI is copied into the layer under its
/// own file name. The checksum is not verified here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileUriInstaller;

impl FileUriInstaller {
    fn artifact_path(uri: &str) -> Result<PathBuf, ResolveError> {
        uri.strip_prefix(FILE_SCHEME).filter(|p| !p.is_empty()).map(PathBuf::from).ok_or_else(|| {
            ResolveError::UnsupportedUri {
                uri: uri.to_string(),
            }
        })
    }
}

impl DependencyInstaller for FileUriInstaller {
    fn install(&self, dependency: &DependencyRecord, layer_path: &Path) -> Result<(), ResolveError> {
        let failed = |reason: String| ResolveError::InstallFailed {
            id: dependency.id.clone(),
            version: dependency.version.clone(),
            reason,
        };

        let source = Self::artifact_path(&dependency.uri)?;
        let file_name = source
            .file_name()
            .ok_or_else(|| failed(format!("artifact path has no file name: {}", source.display())))?;
        let target = layer_path.join(file_name);

        fs::copy(&source, &target).map_err(|e| {
            failed(format!("cannot copy {} to {}: {e}", source.display(), target.display()))
        })?;

        tracing::debug!("Copied {} to {}", source.display(), target.display());
        Ok(())
    }
}
