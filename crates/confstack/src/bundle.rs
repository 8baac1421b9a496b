//! Version-aware property bundle selection.
//!
//! A bundle family is a set of files named
//! `{prefix}-v{major}.{minor}.properties`, living either directly in a
//! directory or under a path prefix inside a zip archive. When a default
//! value changes in some release, a new bundle is added for that version
//! instead of editing the old one; applications pin a version through the
//! selector key and keep the defaults they shipped against.
//!
//! Selection follows a "nearest version not exceeding request" rule:
//! given bundles v1.0, v1.5 and v2.0, requesting v1.3 selects v1.0,
//! requesting v2.1 selects v2.0, and an empty request selects v2.0. A
//! request below every bundle falls back to the lowest one rather than
//! failing.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::properties::{self, PROPERTIES_SUFFIX};
use crate::resource::Resource;
use crate::version::VersionToken;

/// Where a bundle family lives
#[derive(Debug, Clone)]
pub enum BundleLocation {
    /// Bundles are direct children of a directory
    Directory(PathBuf),
    /// Bundles are entries under `prefix` inside a zip archive
    Archive {
        path: PathBuf,
        prefix: String,
    },
}

#[derive(Debug, Clone)]
struct Candidate {
    version: VersionToken,
    resource: Resource,
}

/// Selects and loads the property bundle applicable to a requested version.
///
/// Loading is layered: every bundle at or below the selection is folded into
/// the result in ascending version order, the selected bundle last so its
/// values win all ties. Bundles above the selection are never loaded.
#[derive(Debug, Clone)]
pub struct BundleResolver {
    prefix: String,
    location: BundleLocation,
}

impl BundleResolver {
    /// Create a resolver for the bundle family `{prefix}-v*.properties`
    /// at the given location
    pub fn new(prefix: impl Into<String>, location: BundleLocation) -> Self {
        Self {
            prefix: prefix.into(),
            location,
        }
    }

    /// File name prefix of the bundle family
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produce the active property mapping for the requested version.
    ///
    /// An empty or absent request selects the highest available bundle. A
    /// malformed request is a hard [`ConfigError::InvalidVersion`]; an empty
    /// candidate list yields an empty map, not an error.
    pub fn resolve(&self, requested: Option<&str>) -> ConfigResult<HashMap<String, String>> {
        let mut candidates = self.enumerate()?;
        // stable sort: duplicate versions keep enumeration order
        candidates.sort_by_key(|c| c.version);

        if candidates.is_empty() {
            debug!(prefix = %self.prefix, "no version bundles found");
            return Ok(HashMap::new());
        }

        let chosen = choose(&candidates, requested)?;
        debug!(
            prefix = %self.prefix,
            version = %candidates[chosen].version,
            requested = requested.unwrap_or(""),
            "selected version bundle"
        );

        let mut merged = HashMap::new();
        for candidate in &candidates[..chosen] {
            let content = candidate.resource.read_to_string()?;
            merged.extend(properties::parse(&content));
        }
        let content = candidates[chosen].resource.read_to_string()?;
        merged.extend(properties::parse(&content));
        Ok(merged)
    }

    fn enumerate(&self) -> ConfigResult<Vec<Candidate>> {
        match &self.location {
            BundleLocation::Directory(dir) => {
                let mut out = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let entry = entry?;
                    let name = entry.file_name();
                    let Some(name) = name.to_str() else { continue };
                    if let Some(version) = self.parse_bundle_name(name) {
                        out.push(Candidate {
                            version,
                            resource: Resource::File(entry.path()),
                        });
                    }
                }
                Ok(out)
            }
            BundleLocation::Archive { path, prefix } => {
                let file = fs::File::open(path)?;
                let archive = zip::ZipArchive::new(file).map_err(|source| {
                    ConfigError::Archive {
                        path: path.clone(),
                        source,
                    }
                })?;

                let mut out = Vec::new();
                for entry_name in archive.file_names() {
                    let Some(rest) = entry_name.strip_prefix(prefix.as_str()) else {
                        continue;
                    };
                    let name = rest.trim_start_matches('/');
                    if name.contains('/') {
                        // only direct children of the prefix
                        continue;
                    }
                    if let Some(version) = self.parse_bundle_name(name) {
                        out.push(Candidate {
                            version,
                            resource: Resource::ArchiveEntry {
                                archive: path.clone(),
                                entry: entry_name.to_string(),
                            },
                        });
                    }
                }
                Ok(out)
            }
        }
    }

    /// `{prefix}-v{major}.{minor}.properties` yields a token; any other
    /// name is silently discarded.
    fn parse_bundle_name(&self, name: &str) -> Option<VersionToken> {
        let rest = name.strip_prefix(self.prefix.as_str())?;
        let rest = rest.strip_prefix('-')?;
        let fragment = rest.strip_suffix(PROPERTIES_SUFFIX)?;
        if !fragment.starts_with('v') {
            return None;
        }
        fragment.parse().ok()
    }
}

/// Index of the active candidate in an ascending-sorted list.
fn choose(candidates: &[Candidate], requested: Option<&str>) -> ConfigResult<usize> {
    let requested = match requested {
        Some(s) if !s.is_empty() => s,
        // no version requested: use the latest
        _ => return Ok(candidates.len() - 1),
    };
    let token: VersionToken = requested.parse()?;

    // scan from the highest version down; first candidate not exceeding
    // the request wins
    for (idx, candidate) in candidates.iter().enumerate().rev() {
        if candidate.version <= token {
            return Ok(idx);
        }
    }

    // request is below every candidate: the oldest bundle is the closest
    Ok(0)
}
