//! Filesystem helpers shared by the layer store and the installer.

pub mod fs;

pub use fs::{atomic_write, ensure_dir, reset_dir, safe_write};
