//! Host-framework environment provider for confstack.
//!
//! Some applications embed confstack inside a larger framework that has a
//! configuration surface of its own (profiles, command-line overrides, a
//! layered environment). This crate bridges that surface into the provider
//! ladder at the highest built-in priority (500): the framework registers
//! its environment through [`set_environment`] once it is ready, and every
//! lookup from then on consults it first.
//!
//! Linking this crate is the opt-in. An application that never registers a
//! [`HostEnvironment`] gets absent values from the provider, not errors —
//! and an application that does not register the provider at all never
//! pays for the probe. There is no runtime detection to repeat: absence of
//! the framework is simply absence of the registration.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use confstack::ConfigResolver;
//! use confstack_hostenv::{HostEnvProvider, HostEnvironment};
//!
//! struct FrameworkEnv;
//!
//! impl HostEnvironment for FrameworkEnv {
//!     fn get_property(&self, key: &str) -> Option<String> {
//!         // delegate to the framework's own lookup
//!         # let _ = key;
//!         None
//!     }
//! }
//!
//! confstack_hostenv::set_environment(Arc::new(FrameworkEnv));
//!
//! let resolver = ConfigResolver::builder()
//!     .with_provider(Arc::new(HostEnvProvider::new()))
//!     .with_system_props()
//!     .with_env()
//!     .build();
//! ```

use std::sync::{Arc, OnceLock, RwLock};

use tracing::debug;

use confstack::providers::{priority, Provider};
use confstack::ConfigResult;

/// Control key read from the host environment itself at registration
/// time; set it to anything but `true` to keep the registration inert.
/// Missing means enabled.
pub const ENABLED_KEY: &str = "confstack.hostenv.enabled";

/// The configuration surface of an embedding framework
pub trait HostEnvironment: Send + Sync {
    /// Look up a property in the framework's environment
    fn get_property(&self, key: &str) -> Option<String>;
}

struct Registered {
    env: Arc<dyn HostEnvironment>,
    enabled: bool,
}

fn slot() -> &'static RwLock<Option<Registered>> {
    static SLOT: OnceLock<RwLock<Option<Registered>>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(None))
}

/// Register the framework's environment.
///
/// Called by the embedding framework once its environment is fully
/// initialized; lookups issued before that see absent values. The
/// [`ENABLED_KEY`] control property is evaluated here, once.
pub fn set_environment(env: Arc<dyn HostEnvironment>) {
    let enabled = env
        .get_property(ENABLED_KEY)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(true);
    debug!(enabled, "host environment registered");

    if let Ok(mut guard) = slot().write() {
        *guard = Some(Registered { env, enabled });
    }
}

/// Remove the registered environment, if any.
///
/// Mainly useful in tests; a framework shutting down can also call this
/// to stop serving stale values.
pub fn clear_environment() {
    if let Ok(mut guard) = slot().write() {
        *guard = None;
    }
}

/// Serves the registered [`HostEnvironment`] at priority 500.
///
/// Absence of a registration — or a poisoned registration slot — degrades
/// to absent values; this provider never fails a lookup.
#[derive(Debug, Default)]
pub struct HostEnvProvider;

impl HostEnvProvider {
    /// Create a host environment provider
    pub fn new() -> Self {
        Self
    }
}

impl Provider for HostEnvProvider {
    fn name(&self) -> &str {
        "hostenv"
    }

    fn priority(&self) -> i32 {
        priority::FRAMEWORK
    }

    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        let Ok(guard) = slot().read() else {
            return Ok(None);
        };
        let Some(registered) = guard.as_ref() else {
            return Ok(None);
        };
        if !registered.enabled {
            return Ok(None);
        }
        Ok(registered.env.get_property(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confstack::ConfigResolver;
    use std::collections::HashMap;

    struct MapEnvironment(HashMap<String, String>);

    impl MapEnvironment {
        fn new(pairs: &[(&str, &str)]) -> Arc<dyn HostEnvironment> {
            Arc::new(Self(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ))
        }
    }

    impl HostEnvironment for MapEnvironment {
        fn get_property(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    // one test function: the registration slot is process-wide and the
    // sequence below would race against itself across parallel tests
    #[test]
    fn test_registration_lifecycle() {
        clear_environment();
        let provider = HostEnvProvider::new();

        // unregistered: absent, not an error
        assert_eq!(provider.get("hostenv.test.key").unwrap(), None);

        set_environment(MapEnvironment::new(&[
            ("hostenv.test.key", "from-framework"),
        ]));
        assert_eq!(
            provider.get("hostenv.test.key").unwrap().unwrap(),
            "from-framework"
        );

        // the provider outranks the system property table
        confstack::sysprops::set("hostenv.test.key", "from-table");
        let resolver = ConfigResolver::builder()
            .with_provider(Arc::new(HostEnvProvider::new()))
            .with_system_props()
            .build();
        assert_eq!(
            resolver.get("hostenv.test.key").unwrap().unwrap(),
            "from-framework"
        );
        confstack::sysprops::remove("hostenv.test.key");

        // a disabled environment answers absent for everything
        set_environment(MapEnvironment::new(&[
            (ENABLED_KEY, "false"),
            ("hostenv.test.key", "from-framework"),
        ]));
        assert_eq!(provider.get("hostenv.test.key").unwrap(), None);

        clear_environment();
        assert_eq!(provider.get("hostenv.test.key").unwrap(), None);
    }
}
