//! Process environment provider.

use tracing::debug;

use super::traits::{priority, Provider};
use crate::error::ConfigResult;

/// Reads process environment variables by exact key name.
///
/// No prefixing or case mapping is applied: looking up `database.host`
/// reads the environment variable literally named `database.host`. The
/// environment is read live at query time, so values set after resolver
/// construction are still visible.
#[derive(Debug, Default)]
pub struct EnvProvider;

impl EnvProvider {
    /// Create an environment provider
    pub fn new() -> Self {
        Self
    }
}

impl Provider for EnvProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> i32 {
        priority::ENV
    }

    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => {
                debug!(key, "environment variable is not valid UTF-8, treating as absent");
                Ok(None)
            }
        }
    }
}
