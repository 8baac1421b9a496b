//! Ranked configuration providers.
//!
//! A provider is a single source of configuration values with a fixed
//! priority. The [`crate::resolver::ConfigResolver`] queries providers in
//! descending priority order and returns the first value found.
//!
//! # Built-in Providers
//!
//! - **System property table** (400): process-wide overrides, see
//!   [`crate::sysprops`]
//! - **Environment variables** (300): exact key names, no prefixing
//! - **User property file** (200): a file named by its selector key, or a
//!   default name
//! - **Version bundles** (100): version-stamped bundles selected per
//!   [`crate::bundle::BundleResolver`]
//!
//! The host-framework environment provider (500) lives in the separate
//! `confstack-hostenv` crate; linking that crate is the opt-in.

pub mod env;
pub mod system;
pub mod traits;
pub mod user;
pub mod version_bundle;

// Re-export core types
pub use traits::{priority, Provider};

// Re-export provider implementations
pub use env::EnvProvider;
pub use system::SystemPropsProvider;
pub use user::UserFileProvider;
pub use version_bundle::VersionBundleProvider;
