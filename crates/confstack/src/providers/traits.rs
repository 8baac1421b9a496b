//! Core trait for ranked configuration providers.

use std::fmt;

use crate::error::{ConfigError, ConfigResult};

/// Priority ladder for the built-in providers. Higher wins.
///
/// `LOW` and `HIGH` bracket the ladder for application-defined providers
/// that should lose to or beat everything built in.
pub mod priority {
    pub const LOW: i32 = 0;
    pub const VERSION: i32 = 100;
    pub const USER: i32 = 200;
    pub const ENV: i32 = 300;
    pub const SYSTEM: i32 = 400;
    pub const FRAMEWORK: i32 = 500;
    pub const HIGH: i32 = 1000;
}

/// A ranked source of configuration values
///
/// Implementations must be thread-safe: a provider is shared behind an
/// `Arc` and queried from any thread. Providers that read files lazily
/// build their property set on first lookup and cache it for the instance's
/// lifetime; `Ok(None)` means "this provider does not define the key" and
/// resolution continues with the next provider, while `Err` aborts the
/// lookup.
pub trait Provider: Send + Sync + fmt::Debug {
    /// Short name used in log events
    fn name(&self) -> &str;

    /// Rank of this provider; higher priorities are consulted first
    fn priority(&self) -> i32;

    /// Look up a raw string value
    fn get(&self, key: &str) -> ConfigResult<Option<String>>;

    /// Look up a value and parse it as an integer.
    ///
    /// Non-numeric text is a hard [`ConfigError::InvalidInt`], never a
    /// silent default.
    fn get_int(&self, key: &str) -> ConfigResult<Option<i64>> {
        match self.get(key)? {
            Some(value) => coerce_int(key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Look up a value and parse it as a boolean.
    ///
    /// Case-insensitive `"true"` parses true; any other text, and an
    /// absent key, are false.
    fn get_bool(&self, key: &str) -> ConfigResult<bool> {
        Ok(self
            .get(key)?
            .map(|value| coerce_bool(&value))
            .unwrap_or(false))
    }
}

/// Integer coercion shared by providers and the resolver.
pub(crate) fn coerce_int(key: &str, value: &str) -> ConfigResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidInt {
            key: key.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Boolean coercion: only canonical true text parses true.
pub(crate) fn coerce_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
