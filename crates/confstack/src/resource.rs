//! Resource handles and location resolution.
//!
//! A [`Resource`] is an opaque handle to something readable: a plain file or
//! an entry inside a zip archive. The [`ResourceLocator`] resolves bare file
//! names against the working directory and a configured list of search
//! roots, the way a runtime resolves resources packaged with an
//! application.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

/// Prefix marking a reference that must resolve against the locator's
/// search roots rather than the working directory.
pub const RES_PREFIX: &str = "res:";

/// Handle to a readable configuration source
#[derive(Debug, Clone)]
pub enum Resource {
    /// A plain file on disk
    File(PathBuf),
    /// An entry inside a zip archive
    ArchiveEntry {
        archive: PathBuf,
        entry: String,
    },
}

impl Resource {
    /// Read the full contents of the resource as UTF-8 text.
    ///
    /// An unreadable file or corrupt archive is fatal; a missing archive
    /// entry surfaces as [`ConfigError::ResourceNotFound`].
    pub fn read_to_string(&self) -> ConfigResult<String> {
        match self {
            Resource::File(path) => Ok(fs::read_to_string(path)?),
            Resource::ArchiveEntry { archive, entry } => {
                let file = fs::File::open(archive)?;
                let mut zip = zip::ZipArchive::new(file).map_err(|source| {
                    ConfigError::Archive {
                        path: archive.clone(),
                        source,
                    }
                })?;

                let mut entry_file = match zip.by_name(entry) {
                    Ok(entry_file) => entry_file,
                    Err(zip::result::ZipError::FileNotFound) => {
                        return Err(ConfigError::ResourceNotFound {
                            location: format!("{}!{}", archive.display(), entry),
                        });
                    }
                    Err(source) => {
                        return Err(ConfigError::Archive {
                            path: archive.clone(),
                            source,
                        });
                    }
                };

                let mut buf = String::new();
                entry_file.read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

/// Resolves file names to concrete paths.
///
/// Bare names are checked against the working directory first, then each
/// search root in registration order. Names carrying the [`RES_PREFIX`]
/// skip the working directory and resolve against the roots only.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    search_roots: Vec<PathBuf>,
}

impl ResourceLocator {
    /// Create a locator with no search roots
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search root (builder pattern)
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// Add a search root
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.search_roots.push(root.into());
    }

    /// Resolve a location reference to an existing file path.
    pub fn locate(&self, location: &str) -> ConfigResult<PathBuf> {
        let not_found = || ConfigError::ResourceNotFound {
            location: location.to_string(),
        };

        if let Some(name) = location.strip_prefix(RES_PREFIX) {
            let name = name.trim_start_matches('/');
            return self.locate_in_roots(name).ok_or_else(not_found);
        }

        let direct = PathBuf::from(location);
        if direct.is_file() {
            return Ok(direct);
        }
        self.locate_in_roots(location).ok_or_else(not_found)
    }

    fn locate_in_roots(&self, name: &str) -> Option<PathBuf> {
        self.search_roots
            .iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_locates_file_in_search_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.properties"), "key=value\n").unwrap();

        let locator = ResourceLocator::new().with_root(dir.path());
        let path = locator.locate("app.properties").unwrap();
        assert_eq!(path, dir.path().join("app.properties"));
    }

    #[test]
    fn test_roots_are_searched_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("app.properties"), "which=first\n").unwrap();
        fs::write(second.path().join("app.properties"), "which=second\n").unwrap();

        let locator = ResourceLocator::new()
            .with_root(first.path())
            .with_root(second.path());
        let path = locator.locate("app.properties").unwrap();
        assert!(path.starts_with(first.path()));
    }

    #[test]
    fn test_res_prefix_misses_are_not_found() {
        let dir = TempDir::new().unwrap();
        let locator = ResourceLocator::new().with_root(dir.path());

        let result = locator.locate("res:absent.properties");
        assert!(matches!(result, Err(ConfigError::ResourceNotFound { .. })));
    }

    #[test]
    fn test_absolute_path_bypasses_roots() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("direct.properties");
        fs::write(&path, "key=value\n").unwrap();

        let locator = ResourceLocator::new();
        let located = locator.locate(path.to_str().unwrap()).unwrap();
        assert_eq!(located, path);
    }

    #[test]
    fn test_reads_archive_entry() {
        let dir = TempDir::new().unwrap();
        let archive_path = dir.path().join("bundle.zip");

        let file = fs::File::create(&archive_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("conf/app.properties", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"key=from-archive\n").unwrap();
        writer.finish().unwrap();

        let resource = Resource::ArchiveEntry {
            archive: archive_path,
            entry: "conf/app.properties".into(),
        };
        let content = resource.read_to_string().unwrap();
        assert_eq!(content, "key=from-archive\n");
    }

    #[test]
    fn test_missing_archive_entry_is_not_found() {
        let dir = TempDir::new().unwrap();
        let archive_path = dir.path().join("bundle.zip");

        let file = fs::File::create(&archive_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("present.properties", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"key=value\n").unwrap();
        writer.finish().unwrap();

        let resource = Resource::ArchiveEntry {
            archive: archive_path,
            entry: "absent.properties".into(),
        };
        let result = resource.read_to_string();
        assert!(matches!(result, Err(ConfigError::ResourceNotFound { .. })));
    }
}
