//! Version tokens parsed from bundle file names and selector values.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A two-component version parsed from a `v{major}.{minor}` fragment.
///
/// The leading `v` is optional on input and not part of the token's
/// identity: `"v1.5"` and `"1.5"` parse to equal tokens. Ordering is
/// lexicographic on `(major, minor)`; there is no patch or pre-release
/// component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionToken {
    major: u32,
    minor: u32,
}

impl VersionToken {
    /// Create a token from its numeric components
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Major component
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Minor component
    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl FromStr for VersionToken {
    type Err = ConfigError;

    /// Parses `v?<major>.<minor>`; the string must split into exactly two
    /// integer components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidVersion { input: s.to_string() };

        let digits = s.strip_prefix('v').unwrap_or(s);
        let mut parts = digits.split('.');
        let (major, minor) = match (parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), None) => (major, minor),
            _ => return Err(invalid()),
        };

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}
