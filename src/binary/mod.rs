//! Binary container for resolved lists.
//!
//! Entries are stored as a protobuf `GeoSiteList`, the rule database format
//! read by V2Ray-family routers. CIDR rules travel in `GeoSite` field 100,
//! which no router schema version assigns, so domain-only readers drop it as
//! an unknown field.
//!
//! # Layout
//!
//! ```text
//! GeoSiteList
//! +-- entry (GeoSite), sorted by country_code
//!     +-- country_code
//!     +-- domain*   type, value, attribute*
//!     +-- cidr*     ip_addr, prefix
//! ```

mod format;
mod reader;
pub mod writer;

#[cfg(test)]
mod tests;

pub use format::*;
pub use reader::GeoSiteReader;
pub use writer::GeoSiteWriter;
