//! Priority-ordered configuration resolution with version-stamped property
//! bundles.
//!
//! Applications read configuration through a [`ConfigResolver`], which
//! consults a set of ranked [`Provider`]s and returns the first value
//! found. The built-in ladder, highest priority first:
//!
//! 1. Host-framework environment (500, separate `confstack-hostenv` crate)
//! 2. Process-wide property table (400, [`sysprops`])
//! 3. Environment variables (300)
//! 4. User property file (200)
//! 5. Version-stamped property bundles (100)
//!
//! Version bundles let a library ship several generations of defaults side
//! by side (`app-defaults-v1.0.properties`, `app-defaults-v2.0.properties`,
//! ...) and serve the generation matching the version an application pins
//! through a selector key; see [`bundle::BundleResolver`] for the selection
//! rule.
//!
//! # Example
//!
//! ```rust,no_run
//! use confstack::{BundleLocation, ConfigResolver, ResourceLocator};
//!
//! # fn main() -> confstack::ConfigResult<()> {
//! let resolver = ConfigResolver::builder()
//!     .with_system_props()
//!     .with_env()
//!     .with_user_file("app.properties", "app", ResourceLocator::new().with_root("conf"))
//!     .with_version_bundle(
//!         "app-defaults",
//!         "app.version",
//!         BundleLocation::Directory("conf".into()),
//!     )
//!     .build();
//!
//! if let Some(host) = resolver.get("database.host")? {
//!     println!("connecting to {host}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Providers build their property sets lazily on first lookup and cache
//! them; [`ConfigResolver::reload`] discards the registry so the next
//! lookup starts fresh. All operations are synchronous and thread-safe.

pub mod bundle;
pub mod error;
pub mod properties;
pub mod providers;
pub mod resolver;
pub mod resource;
pub mod sysprops;
pub mod version;

// Re-export the primary surface
pub use bundle::{BundleLocation, BundleResolver};
pub use error::{ConfigError, ConfigResult};
pub use providers::{
    priority, EnvProvider, Provider, SystemPropsProvider, UserFileProvider, VersionBundleProvider,
};
pub use resolver::{ConfigResolver, ConfigResolverBuilder, ProviderFactory, ResolverHandle};
pub use resource::{Resource, ResourceLocator};
pub use version::VersionToken;
