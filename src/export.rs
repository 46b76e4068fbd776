//! Plaintext export of resolved lists.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ahash::{AHashMap, AHashSet};

use crate::index::{normalize_name, FileIndex};
use crate::list::ResolvedList;
use crate::Result;

/// Writes the flattened rule values of requested lists, once per run.
pub struct PlainTextExporter {
    output_dir: PathBuf,
    /// Normalized identifier -> file name as requested
    requested: AHashMap<String, String>,
    exported: AHashSet<String>,
}

impl PlainTextExporter {
    /// Prepare exports for `names`.
    ///
    /// Names missing from the data directory are reported with a warning and
    /// dropped; they never produce a file.
    pub fn new<S: AsRef<str>>(names: &[S], index: &FileIndex, output_dir: impl Into<PathBuf>) -> Self {
        let mut requested = AHashMap::new();
        for name in names {
            let display = name.as_ref().trim();
            if display.is_empty() {
                continue;
            }
            if index.contains(display) {
                requested
                    .entry(normalize_name(display))
                    .or_insert_with(|| display.to_string());
            } else {
                log::warn!("'{}' list does not exist in the data directory", display);
            }
        }

        Self {
            output_dir: output_dir.into(),
            requested,
            exported: AHashSet::new(),
        }
    }

    /// Check whether a list is requested for export.
    pub fn is_requested(&self, name: &str) -> bool {
        self.requested.contains_key(&normalize_name(name))
    }

    /// Export `list` if it was requested and has not been written yet.
    ///
    /// Returns the path written, or `None` when nothing was done.
    pub fn export(&mut self, list: &ResolvedList) -> Result<Option<PathBuf>> {
        let key = normalize_name(&list.name);
        let Some(file_name) = self.requested.get(&key) else {
            return Ok(None);
        };
        if self.exported.contains(&key) {
            return Ok(None);
        }

        let path = self.output_dir.join(file_name);
        write_values(&path, list)?;
        log::info!("Exported '{}' ({} rules) to {:?}", list.name, list.len(), path);

        self.exported.insert(key);
        Ok(Some(path))
    }
}

fn write_values(path: &Path, list: &ResolvedList) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in list.values() {
        writeln!(writer, "{}", value)?;
    }
    writer.flush()?;
    Ok(())
}
