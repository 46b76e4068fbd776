//! Geosite - builds a canonical domain/IP rule database from list files.
//!
//! A data directory holds small, human-edited list files. Each file name is a
//! list identifier; lists may pull in other lists with `include:` directives.
//! This crate resolves those references and writes one sorted binary
//! container, plus optional plaintext exports of selected lists.
//!
//! # Features
//!
//! - **Rule kinds**: domain, full domain, keyword, regex and IP-CIDR rules
//! - **Attributes**: `@tag` annotations, filterable at include boundaries
//! - **Includes**: memoized expansion with cycle and missing-list detection
//! - **Deduplication**: structurally equal rules collapse to one
//! - **Reproducible output**: entries sorted by country code, canonical encoding
//!
//! # Quick Start
//!
//! ```ignore
//! use geosite::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     data_path: "./data".into(),
//!     export_lists: vec!["cn".to_string()],
//!     ..GeneratorConfig::default()
//! };
//!
//! let summary = Generator::new(config).run()?;
//! println!("{} lists written to {:?}", summary.lists, summary.output_path);
//! ```
//!
//! # Resolving a single list
//!
//! ```ignore
//! use geosite::{FileIndex, Resolver};
//!
//! let index = FileIndex::build("./data")?;
//! let mut resolver = Resolver::new(&index);
//! let cn = resolver.resolve("cn")?;
//! for value in cn.values() {
//!     println!("{}", value);
//! }
//! ```
//!
//! # List Syntax
//!
//! - `example.com` / `domain:example.com`: domain and subdomains
//! - `full:www.example.com`: exact domain
//! - `keyword:example`: substring
//! - `regexp:^ad[0-9]+\.example\.com$`: regular expression
//! - `10.0.0.0/8`: IP network
//! - `include:other@tag,-tag`: rules of another list, filtered by attribute
//! - `# comment`

mod error;
mod rule_type;

pub mod binary;
pub mod builder;
pub mod config;
pub mod export;
pub mod generator;
pub mod index;
pub mod list;
pub mod resolver;
pub mod rule;

// Re-export core types
pub use error::{Error, Result};
pub use rule_type::RuleKind;

pub use binary::{Entry, GeoSiteReader, GeoSiteWriter};
pub use builder::build_entry;
pub use config::{parse_export_lists, GeneratorConfig};
pub use export::PlainTextExporter;
pub use generator::{GenerateSummary, Generator};
pub use index::FileIndex;
pub use list::{Include, List, ListParser, ResolvedList};
pub use resolver::Resolver;
pub use rule::{AttributeFilter, Rule};
