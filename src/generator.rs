//! End-to-end generation run.
//!
//! Indexes the data directory, resolves every list, exports requested lists
//! as plaintext, and writes the sorted container. Any error stops the run
//! before the container is written.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::binary::{Entry, GeoSiteWriter};
use crate::builder::build_entry;
use crate::config::GeneratorConfig;
use crate::export::PlainTextExporter;
use crate::index::FileIndex;
use crate::resolver::Resolver;
use crate::{Error, Result};

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Number of entries written
    pub lists: usize,
    /// Domain-like rules across all entries
    pub domain_rules: usize,
    /// CIDR rules across all entries
    pub cidr_rules: usize,
    /// Path of the container
    pub output_path: PathBuf,
    /// Size of the container in bytes
    pub bytes: usize,
    /// Plaintext files written, in write order
    pub exported: Vec<PathBuf>,
    /// Checksum file, if requested
    pub checksum_path: Option<PathBuf>,
}

/// Drives a generation run.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline.
    pub fn run(&self) -> Result<GenerateSummary> {
        self.config.validate()?;

        let index = FileIndex::build(&self.config.data_path)?;
        log::info!(
            "Found {} lists in {:?}",
            index.len(),
            self.config.data_path
        );

        fs::create_dir_all(&self.config.output_dir)?;

        let mut resolver = Resolver::new(&index);
        let mut exporter = PlainTextExporter::new(
            self.config.export_lists.as_slice(),
            &index,
            &self.config.output_dir,
        );
        let mut summary = GenerateSummary::default();
        let mut entries = Vec::with_capacity(index.len());

        for name in index.names() {
            let resolved = resolver.resolve(name)?;
            let entry = build_entry(&resolved)?;
            summary.domain_rules += entry.domains.len();
            summary.cidr_rules += entry.cidrs.len();
            entries.push(entry);

            if let Some(path) = exporter.export(&resolved)? {
                summary.exported.push(path);
            }
        }

        sort_entries(&mut entries);
        let data = GeoSiteWriter::new().write(&entries);

        // Stage every output before renaming any into place.
        let output_path = self.config.output_path();
        let container = stage(&output_path, &data)?;
        let checksum = if self.config.write_checksum {
            let checksum_path = self.config.checksum_path();
            let line = format!("{}  {}\n", sha256_hex(&data), self.config.output_name);
            let temp = stage(&checksum_path, line.as_bytes())?;
            Some((temp, checksum_path))
        } else {
            None
        };

        commit(container, &output_path)?;
        if let Some((temp, checksum_path)) = checksum {
            commit(temp, &checksum_path)?;
            summary.checksum_path = Some(checksum_path);
        }

        summary.lists = entries.len();
        summary.bytes = data.len();
        summary.output_path = output_path;

        log::info!(
            "Wrote {} entries ({} domain rules, {} CIDR rules, {} bytes) to {:?}",
            summary.lists,
            summary.domain_rules,
            summary.cidr_rules,
            summary.bytes,
            summary.output_path
        );

        Ok(summary)
    }
}

/// Order entries by country code so identical input gives identical bytes.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.country_code.cmp(&b.country_code));
}

/// Hex-encoded SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Mode of every file the generator writes.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Write `data` to a temp file in the directory of `path`.
fn stage(path: &Path, data: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let to_error = |source| Error::Serialization {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(to_error)?;
    temp.write_all(data).map_err(to_error)?;
    temp.flush().map_err(to_error)?;

    // Temp files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))
            .map_err(to_error)?;
    }

    Ok(temp)
}

/// Rename a staged file into place.
///
/// A failed rename of the checksum file leaves the new container in place
/// without a matching checksum.
fn commit(temp: NamedTempFile, path: &Path) -> Result<()> {
    temp.persist(path).map_err(|e| Error::Serialization {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
