//! Data directory indexing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

/// Maps list identifiers to the files that define them.
///
/// Every regular file under the data directory is a list; its base name,
/// lowercased, is the identifier. Files sharing a name in different
/// subdirectories are kept in traversal order and later read as one list.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    lists: BTreeMap<String, Vec<PathBuf>>,
}

impl FileIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and index every regular file.
    ///
    /// Entries are visited in file-name order so repeated runs see files in
    /// the same order. Any traversal error aborts indexing.
    pub fn build(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut index = Self::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::Traversal {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            index.insert(&name, entry.into_path());
        }

        log::debug!("Indexed {} lists under {:?}", index.len(), root);
        Ok(index)
    }

    /// Register a source file for a list.
    pub fn insert(&mut self, name: &str, path: PathBuf) {
        self.lists
            .entry(normalize_name(name))
            .or_default()
            .push(path);
    }

    /// Source files for a list, in traversal order.
    pub fn paths(&self, name: &str) -> Option<&[PathBuf]> {
        self.lists.get(&normalize_name(name)).map(Vec::as_slice)
    }

    /// Check whether a list is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.lists.contains_key(&normalize_name(name))
    }

    /// All identifiers, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// Number of lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Canonical form of a list identifier.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
