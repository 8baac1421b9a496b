//! Process-wide property table.
//!
//! The analog of a runtime's global property map: a mutable set of
//! key/value overrides shared by the whole process, outranking environment
//! variables in the provider ladder. Selector keys (which user file, which
//! bundle version) are conventionally set here before the first lookup.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

fn table() -> &'static RwLock<HashMap<String, String>> {
    static TABLE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Read a property by exact key name
pub fn get(key: &str) -> Option<String> {
    table().read().ok()?.get(key).cloned()
}

/// Set a property, returning the previous value if any
pub fn set(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    table().write().ok()?.insert(key.into(), value.into())
}

/// Remove a property, returning the removed value if any
pub fn remove(key: &str) -> Option<String> {
    table().write().ok()?.remove(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    // keys are unique per test: the table is process-wide and tests run in
    // parallel

    #[test]
    fn test_set_get_remove() {
        assert_eq!(get("sysprops.test.roundtrip"), None);

        set("sysprops.test.roundtrip", "value");
        assert_eq!(get("sysprops.test.roundtrip").unwrap(), "value");

        assert_eq!(remove("sysprops.test.roundtrip").unwrap(), "value");
        assert_eq!(get("sysprops.test.roundtrip"), None);
    }

    #[test]
    fn test_set_returns_previous_value() {
        set("sysprops.test.previous", "old");
        let previous = set("sysprops.test.previous", "new");
        assert_eq!(previous.unwrap(), "old");
        assert_eq!(get("sysprops.test.previous").unwrap(), "new");
        remove("sysprops.test.previous");
    }
}
