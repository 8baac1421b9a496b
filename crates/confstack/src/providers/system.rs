//! Process-wide property table provider.

use super::traits::{priority, Provider};
use crate::error::ConfigResult;
use crate::sysprops;

/// Reads the process-wide property table ([`crate::sysprops`]).
///
/// The table is read live at query time; combined with
/// [`crate::resolver::ConfigResolver::reload`] this lets tests and
/// embedding applications change selector keys at runtime.
#[derive(Debug, Default)]
pub struct SystemPropsProvider;

impl SystemPropsProvider {
    /// Create a system property table provider
    pub fn new() -> Self {
        Self
    }
}

impl Provider for SystemPropsProvider {
    fn name(&self) -> &str {
        "system"
    }

    fn priority(&self) -> i32 {
        priority::SYSTEM
    }

    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(sysprops::get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflects_table_state() {
        let provider = SystemPropsProvider::new();
        assert_eq!(provider.get("system.provider.test.key").unwrap(), None);

        sysprops::set("system.provider.test.key", "from-table");
        assert_eq!(
            provider.get("system.provider.test.key").unwrap().unwrap(),
            "from-table"
        );

        sysprops::remove("system.provider.test.key");
        assert_eq!(provider.get("system.provider.test.key").unwrap(), None);
    }
}
