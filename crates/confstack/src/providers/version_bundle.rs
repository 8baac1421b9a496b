//! Version-stamped bundle provider.

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{priority, Provider};
use crate::bundle::{BundleLocation, BundleResolver};
use crate::error::{lock_err, ConfigResult};
use crate::resolver::ResolverHandle;

/// Serves defaults from the version bundle family `{prefix}-v*.properties`.
///
/// On first lookup the provider asks its owning resolver for the version
/// selector key — one recursive, full-priority query, so the selector can
/// come from the property table, the environment, or a user file — and
/// hands the answer to a [`BundleResolver`]. The resulting property set is
/// cached for the provider's lifetime.
///
/// The selector key itself is never served from the bundle contents; the
/// skip happens before lazy initialization, which is also what terminates
/// the recursive query.
#[derive(Debug)]
pub struct VersionBundleProvider {
    version_key: String,
    resolver: BundleResolver,
    owner: ResolverHandle,
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl VersionBundleProvider {
    /// Create a provider for the bundle family `{prefix}-v*.properties`
    /// whose active version is named by `version_key`
    pub fn new(
        prefix: impl Into<String>,
        version_key: impl Into<String>,
        location: BundleLocation,
        owner: ResolverHandle,
    ) -> Self {
        Self {
            version_key: version_key.into(),
            resolver: BundleResolver::new(prefix, location),
            owner,
            cache: RwLock::new(None),
        }
    }

    fn ensure_loaded(&self) -> ConfigResult<()> {
        {
            let cache = self.cache.read().map_err(lock_err)?;
            if cache.is_some() {
                return Ok(());
            }
        }

        let mut cache = self.cache.write().map_err(lock_err)?;
        // re-check: another thread may have loaded while we waited
        if cache.is_none() {
            *cache = Some(self.load()?);
        }
        Ok(())
    }

    fn load(&self) -> ConfigResult<HashMap<String, String>> {
        let requested = self.owner.get(&self.version_key)?;
        let mut props = self.resolver.resolve(requested.as_deref())?;
        // the selector is control input, not bundle data
        props.remove(&self.version_key);
        Ok(props)
    }
}

impl Provider for VersionBundleProvider {
    fn name(&self) -> &str {
        "version-bundle"
    }

    fn priority(&self) -> i32 {
        priority::VERSION
    }

    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        if key == self.version_key {
            return Ok(None);
        }
        self.ensure_loaded()?;

        let cache = self.cache.read().map_err(lock_err)?;
        Ok(cache.as_ref().and_then(|map| map.get(key).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ConfigResolver;
    use crate::sysprops;
    use std::fs;
    use tempfile::TempDir;

    fn demo_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let bundles = [
            ("demo-v1.0.properties", "demo.name=v1.0\n"),
            ("demo-v1.5.properties", "demo.name=v1.5\n"),
            ("demo-v2.0.properties", "demo.name=v2.0\n"),
        ];
        for (name, content) in bundles {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn demo_resolver(dir: &TempDir, version_key: &str) -> ConfigResolver {
        ConfigResolver::builder()
            .with_system_props()
            .with_version_bundle(
                "demo",
                version_key,
                BundleLocation::Directory(dir.path().into()),
            )
            .build()
    }

    #[test]
    fn test_defaults_to_latest_bundle() {
        let dir = demo_dir();
        let resolver = demo_resolver(&dir, "vb.test.latest");
        assert_eq!(resolver.get("demo.name").unwrap().unwrap(), "v2.0");
    }

    #[test]
    fn test_selector_key_pins_the_version() {
        let dir = demo_dir();

        sysprops::set("vb.test.pinned", "v1.1");
        let resolver = demo_resolver(&dir, "vb.test.pinned");
        assert_eq!(resolver.get("demo.name").unwrap().unwrap(), "v1.0");
        sysprops::remove("vb.test.pinned");
    }

    #[test]
    fn test_selector_key_is_never_served_from_bundles() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("demo-v1.0.properties"),
            "vb.test.excluded=from-bundle\nother=value\n",
        )
        .unwrap();

        let resolver = demo_resolver(&dir, "vb.test.excluded");
        assert_eq!(resolver.get("other").unwrap().unwrap(), "value");
        // defined in the bundle file, still absent through the provider
        assert_eq!(resolver.get("vb.test.excluded").unwrap(), None);
    }

    #[test]
    fn test_malformed_selector_value_aborts_lookup() {
        let dir = demo_dir();

        sysprops::set("vb.test.malformed", "one-point-oh");
        let resolver = demo_resolver(&dir, "vb.test.malformed");
        let result = resolver.get("demo.name");
        assert!(matches!(
            result,
            Err(crate::error::ConfigError::InvalidVersion { .. })
        ));
        sysprops::remove("vb.test.malformed");
    }

    #[test]
    fn test_no_bundles_means_absent_not_error() {
        let dir = TempDir::new().unwrap();
        let resolver = demo_resolver(&dir, "vb.test.empty");
        assert_eq!(resolver.get("demo.name").unwrap(), None);
    }

    #[test]
    fn test_reload_picks_up_new_selector() {
        let dir = demo_dir();
        let resolver = demo_resolver(&dir, "vb.test.reload");

        assert_eq!(resolver.get("demo.name").unwrap().unwrap(), "v2.0");

        sysprops::set("vb.test.reload", "v1.5");
        // cached until reload
        assert_eq!(resolver.get("demo.name").unwrap().unwrap(), "v2.0");

        resolver.reload().unwrap();
        assert_eq!(resolver.get("demo.name").unwrap().unwrap(), "v1.5");
        sysprops::remove("vb.test.reload");
    }
}
