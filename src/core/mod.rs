//! Core types shared by every stage of runtime resolution
//!
//! # Error Management
//!
//! - **Strongly-typed errors** ([`ResolveError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for CLI users
//! - [`user_friendly_error`] converts any `anyhow::Error` into an [`ErrorContext`]
//!
//! Library functions return `Result<T, ResolveError>`; orchestration code in
//! [`crate::build`] and [`crate::cli`] returns `anyhow::Result` and attaches context.

pub mod error;

pub use error::{ErrorContext, ResolveError, user_friendly_error};
