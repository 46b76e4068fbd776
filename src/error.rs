//! Error types for geosite.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for geosite operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Directory walk failed while indexing the data directory
    #[error("failed to index {path:?}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A list file could not be opened or read
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in a list file
    #[error("{path:?}:{line}: {reason}: {content:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    /// An include points at a list that has no file in the data directory
    #[error("list '{from}' includes undefined list '{target}'")]
    UndefinedReference { from: String, target: String },

    /// Include chain loops back on itself
    #[error("cyclic include: {}", .path.join(" -> "))]
    CyclicReference { path: Vec<String> },

    /// Requested list is not in the data directory
    #[error("unknown list: {0}")]
    UnknownList(String),

    /// A resolved rule cannot be represented in the output schema
    #[error("schema error: {0}")]
    Schema(String),

    /// Writing the output container failed
    #[error("failed to write {path:?}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed container bytes
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for geosite operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = Error::CyclicReference {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cyclic include: a -> b -> a");
    }

    #[test]
    fn test_undefined_reference_message() {
        let err = Error::UndefinedReference {
            from: "all".into(),
            target: "zz".into(),
        };
        assert_eq!(err.to_string(), "list 'all' includes undefined list 'zz'");
    }
}
