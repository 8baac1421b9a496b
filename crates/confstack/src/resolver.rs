//! Priority-ordered resolution across all registered providers.
//!
//! A [`ConfigResolver`] owns an explicit registry of provider factories,
//! populated by the embedding application through the builder. The registry
//! is materialized lazily on first lookup: factories run once, the
//! resulting providers are sorted descending by priority, and the ordered
//! list is cached until [`ConfigResolver::reload`] discards it. Because a
//! rebuild runs the factories again, reload also invalidates every
//! per-provider property cache.
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
//!     .with_user_file("app.properties", "app", ResourceLocator::new())
//!     .with_version_bundle(
//!         "app-defaults",
//!         "app.version",
//!         BundleLocation::Directory("conf".into()),
//!     )
//!     .build();
//!
//! let timeout = resolver.get_int_or("app.timeout", 30)?;
//! # let _ = timeout;
//! # Ok(())
//! # }
//! ```

use std::cmp::Reverse;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use tracing::debug;

use crate::bundle::BundleLocation;
use crate::error::{lock_err, ConfigResult};
use crate::providers::traits::{coerce_bool, coerce_int};
use crate::providers::{
    EnvProvider, Provider, SystemPropsProvider, UserFileProvider, VersionBundleProvider,
};
use crate::resource::ResourceLocator;

/// Constructs a provider during registry population.
///
/// Factories run on every population, so each reload yields fresh provider
/// instances with empty caches. The handle lets providers issue recursive
/// lookups against the resolver that owns them.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, resolver: ResolverHandle) -> Arc<dyn Provider>;
}

impl<F> ProviderFactory for F
where
    F: Fn(ResolverHandle) -> Arc<dyn Provider> + Send + Sync,
{
    fn create(&self, resolver: ResolverHandle) -> Arc<dyn Provider> {
        self(resolver)
    }
}

struct Inner {
    factories: Vec<Arc<dyn ProviderFactory>>,
    providers: RwLock<Option<Arc<Vec<Arc<dyn Provider>>>>>,
}

/// A weak handle to a [`ConfigResolver`].
///
/// Held by providers that need to consult the full priority order while
/// initializing (the version-bundle provider reads its selector key this
/// way). Weak so that provider and resolver do not keep each other alive.
#[derive(Clone)]
pub struct ResolverHandle(Weak<Inner>);

impl ResolverHandle {
    /// Resolve a key through the owning resolver; absent when the
    /// resolver is gone.
    pub fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        match self.0.upgrade() {
            Some(inner) => ConfigResolver { inner }.get(key),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolverHandle").finish()
    }
}

/// Priority-ordered configuration lookup with lazy population and reload
#[derive(Clone)]
pub struct ConfigResolver {
    inner: Arc<Inner>,
}

impl ConfigResolver {
    /// Start building a resolver
    pub fn builder() -> ConfigResolverBuilder {
        ConfigResolverBuilder::default()
    }

    /// Handle for recursive lookups from providers
    pub fn handle(&self) -> ResolverHandle {
        ResolverHandle(Arc::downgrade(&self.inner))
    }

    /// Look up a raw string value, highest-priority provider first.
    ///
    /// `Ok(None)` means no provider defines the key. Provider errors
    /// (unreadable files, corrupt archives, malformed version selectors)
    /// abort the lookup.
    pub fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        let providers = self.ensure_populated()?;
        for provider in providers.iter() {
            if let Some(value) = provider.get(key)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Look up a string value, falling back to `default` when absent
    pub fn get_or(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Look up an integer value; non-numeric text is a hard error
    pub fn get_int(&self, key: &str) -> ConfigResult<Option<i64>> {
        match self.get(key)? {
            Some(value) => coerce_int(key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Look up an integer value, falling back to `default` when absent.
    ///
    /// Parse failures still propagate; only absence uses the default.
    pub fn get_int_or(&self, key: &str, default: i64) -> ConfigResult<i64> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }

    /// Look up a boolean value; absent keys and non-`"true"` text are false
    pub fn get_bool(&self, key: &str) -> ConfigResult<bool> {
        Ok(self.get(key)?.map(|v| coerce_bool(&v)).unwrap_or(false))
    }

    /// Look up a boolean value, falling back to `default` when absent
    pub fn get_bool_or(&self, key: &str, default: bool) -> ConfigResult<bool> {
        Ok(self.get(key)?.map(|v| coerce_bool(&v)).unwrap_or(default))
    }

    /// Discard the populated registry; the next lookup rebuilds it.
    ///
    /// Rebuilding constructs fresh provider instances, so every
    /// per-provider property cache is invalidated as well. Lookups already
    /// in flight may complete against the old registry.
    pub fn reload(&self) -> ConfigResult<()> {
        let mut guard = self.inner.providers.write().map_err(lock_err)?;
        *guard = None;
        debug!("provider registry invalidated");
        Ok(())
    }

    /// Names of the populated providers in priority order
    pub fn provider_names(&self) -> ConfigResult<Vec<String>> {
        let providers = self.ensure_populated()?;
        Ok(providers.iter().map(|p| p.name().to_string()).collect())
    }

    fn ensure_populated(&self) -> ConfigResult<Arc<Vec<Arc<dyn Provider>>>> {
        {
            let guard = self.inner.providers.read().map_err(lock_err)?;
            if let Some(list) = guard.as_ref() {
                return Ok(Arc::clone(list));
            }
        }

        let mut guard = self.inner.providers.write().map_err(lock_err)?;
        // re-check: another thread may have populated while we waited
        if let Some(list) = guard.as_ref() {
            return Ok(Arc::clone(list));
        }

        let handle = self.handle();
        let mut providers: Vec<Arc<dyn Provider>> = self
            .inner
            .factories
            .iter()
            .map(|factory| factory.create(handle.clone()))
            .collect();
        // stable sort: equal priorities keep registration order
        providers.sort_by_key(|p| Reverse(p.priority()));

        for provider in &providers {
            debug!(
                provider = provider.name(),
                priority = provider.priority(),
                "registered provider"
            );
        }

        let list = Arc::new(providers);
        *guard = Some(Arc::clone(&list));
        Ok(list)
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .inner
            .providers
            .try_read()
            .ok()
            .and_then(|guard| {
                guard
                    .as_ref()
                    .map(|list| list.iter().map(|p| p.name().to_string()).collect::<Vec<_>>())
            });
        f.debug_struct("ConfigResolver")
            .field("providers", &names)
            .finish()
    }
}

/// Builder collecting provider factories for a [`ConfigResolver`]
#[derive(Default)]
pub struct ConfigResolverBuilder {
    factories: Vec<Arc<dyn ProviderFactory>>,
}

impl ConfigResolverBuilder {
    /// Register the process environment provider (priority 300)
    pub fn with_env(self) -> Self {
        self.with_factory(|_: ResolverHandle| Arc::new(EnvProvider::new()) as Arc<dyn Provider>)
    }

    /// Register the process-wide property table provider (priority 400)
    pub fn with_system_props(self) -> Self {
        self.with_factory(|_: ResolverHandle| {
            Arc::new(SystemPropsProvider::new()) as Arc<dyn Provider>
        })
    }

    /// Register a user property file provider (priority 200)
    pub fn with_user_file(
        self,
        selector_key: impl Into<String>,
        default_name: impl Into<String>,
        locator: ResourceLocator,
    ) -> Self {
        let selector_key = selector_key.into();
        let default_name = default_name.into();
        self.with_factory(move |_: ResolverHandle| {
            Arc::new(UserFileProvider::new(
                selector_key.clone(),
                default_name.clone(),
                locator.clone(),
            )) as Arc<dyn Provider>
        })
    }

    /// Register a version-bundle provider (priority 100)
    pub fn with_version_bundle(
        self,
        prefix: impl Into<String>,
        version_key: impl Into<String>,
        location: BundleLocation,
    ) -> Self {
        let prefix = prefix.into();
        let version_key = version_key.into();
        self.with_factory(move |handle: ResolverHandle| {
            Arc::new(VersionBundleProvider::new(
                prefix.clone(),
                version_key.clone(),
                location.clone(),
                handle,
            )) as Arc<dyn Provider>
        })
    }

    /// Register a fixed provider instance.
    ///
    /// The instance is shared across reloads, so any cache it holds
    /// survives [`ConfigResolver::reload`]. Prefer [`Self::with_factory`]
    /// for providers that cache loaded files.
    pub fn with_provider(self, provider: Arc<dyn Provider>) -> Self {
        self.with_factory(move |_: ResolverHandle| Arc::clone(&provider))
    }

    /// Register a provider factory
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: ProviderFactory + 'static,
    {
        self.factories.push(Arc::new(factory));
        self
    }

    /// Build the resolver; providers are not constructed until the first
    /// lookup
    pub fn build(self) -> ConfigResolver {
        ConfigResolver {
            inner: Arc::new(Inner {
                factories: self.factories,
                providers: RwLock::new(None),
            }),
        }
    }
}
