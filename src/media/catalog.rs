//! Filename index of the media files in an extracted archive.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::message::MediaKind;

/// One catalogued media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Absolute path on disk
    pub path: PathBuf,
    pub kind: MediaKind,
}

/// Mapping from bare filename to media file, for one archive.
///
/// Export tools never repeat a filename inside one archive; if it happens
/// anyway the last file seen wins. Entries iterate in filename order.
#[derive(Debug, Clone, Default)]
pub struct MediaCatalog {
    root: PathBuf,
    entries: BTreeMap<String, CatalogEntry>,
}

impl MediaCatalog {
    /// Creates an empty catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Recursively indexes every file under `root` with a known media or
    /// document extension.
    ///
    /// Directory entries that cannot be read are skipped.
    pub fn scan(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root)?;
        let mut catalog = Self::new(&root);

        for entry in WalkDir::new(&root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                catalog.insert(entry.into_path());
            }
        }

        debug!(root = %root.display(), files = catalog.len(), "catalogued media");
        Ok(catalog)
    }

    /// Builds a catalog from known paths, keeping only catalogued extensions.
    pub fn from_paths<I, P>(root: impl Into<PathBuf>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut catalog = Self::new(root);
        for path in paths {
            catalog.insert(path.into());
        }
        catalog
    }

    /// Adds `path` if its extension is catalogued. Returns `true` if added.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if !MediaKind::is_catalogued(&path) {
            return false;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_string();
        let kind = MediaKind::from_path(&path);
        self.entries.insert(name, CatalogEntry { path, kind });
        true
    }

    /// Looks up a file by its bare name.
    pub fn get(&self, filename: &str) -> Option<&CatalogEntry> {
        self.entries.get(filename)
    }

    /// Returns the directory the catalog was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(filename, entry)` pairs in filename order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}
