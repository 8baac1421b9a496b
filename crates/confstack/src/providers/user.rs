//! User property file provider.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, warn};

use super::traits::{priority, Provider};
use crate::error::{lock_err, ConfigError, ConfigResult};
use crate::properties::{self, PROPERTIES_SUFFIX};
use crate::resource::ResourceLocator;
use crate::sysprops;

/// Loads a single user-supplied property file.
///
/// The file name defaults to `default_name` and can be overridden by
/// setting the provider's selector key in the process-wide property table
/// before the first lookup. Names without the `.properties` extension get
/// it appended. Resolution checks the working directory first, then the
/// locator's search roots in order.
///
/// A missing default file degrades to an empty property set. A missing
/// *explicitly selected* file logs a warning and degrades the same way;
/// it is never fatal.
#[derive(Debug)]
pub struct UserFileProvider {
    selector_key: String,
    default_name: String,
    locator: ResourceLocator,
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl UserFileProvider {
    /// Create a provider whose file is named by `selector_key`, falling
    /// back to `default_name`
    pub fn new(
        selector_key: impl Into<String>,
        default_name: impl Into<String>,
        locator: ResourceLocator,
    ) -> Self {
        Self {
            selector_key: selector_key.into(),
            default_name: default_name.into(),
            locator,
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
        let selected = sysprops::get(&self.selector_key);
        let mut name = selected
            .clone()
            .unwrap_or_else(|| self.default_name.clone());
        if !name.ends_with(PROPERTIES_SUFFIX) {
            name.push_str(PROPERTIES_SUFFIX);
        }

        match self.locator.locate(&name) {
            Ok(path) => {
                debug!(provider = "user", path = %path.display(), "loading user properties");
                let content = std::fs::read_to_string(&path)?;
                Ok(properties::parse(&content))
            }
            Err(ConfigError::ResourceNotFound { .. }) => {
                if let Some(requested) = selected {
                    warn!(provider = "user", file = %requested, "selected user property file not found");
                }
                Ok(HashMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl Provider for UserFileProvider {
    fn name(&self) -> &str {
        "user"
    }

    fn priority(&self) -> i32 {
        priority::USER
    }

    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        // the selector controls which file loads; it is never reported as
        // data, and the check must precede lazy initialization
        if key == self.selector_key {
            return Ok(None);
        }
        self.ensure_loaded()?;

        let cache = self.cache.read().map_err(lock_err)?;
        Ok(cache.as_ref().and_then(|map| map.get(key).cloned()))
    }
}
