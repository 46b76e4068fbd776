//! Container schema constants and entry structures.
//!
//! The container is the protobuf encoding of a `GeoSiteList`:
//!
//! ```text
//! GeoSiteList { repeated GeoSite entry = 1; }
//! GeoSite     { string country_code = 1; repeated Domain domain = 2; repeated CIDR cidr = 100; }
//! Domain      { Type type = 1; string value = 2; repeated Attribute attribute = 3; }
//! Attribute   { string key = 1; bool bool_value = 2; }
//! CIDR        { bytes ip_addr = 1; uint32 prefix = 2; }
//! ```
//!
//! `GeoSite` fields 3 (`resource_hash`), 4 (`code`) and 68000 (`file_path`)
//! belong to the v5 router schema, so CIDR rules use field 100.

use std::net::IpAddr;

use crate::{Error, Result};

/// Varint wire type.
pub const WIRE_VARINT: u8 = 0;
/// Fixed 64-bit wire type.
pub const WIRE_FIXED64: u8 = 1;
/// Length-delimited wire type.
pub const WIRE_LEN: u8 = 2;
/// Fixed 32-bit wire type.
pub const WIRE_FIXED32: u8 = 5;

/// `GeoSiteList.entry`
pub const LIST_ENTRY: u32 = 1;

/// `GeoSite.country_code`
pub const SITE_COUNTRY_CODE: u32 = 1;
/// `GeoSite.domain`
pub const SITE_DOMAIN: u32 = 2;
/// `GeoSite.resource_hash` in the v5 router schema; never written
pub const SITE_RESOURCE_HASH: u32 = 3;
/// `GeoSite.cidr`, outside the field numbers the router schema assigns
pub const SITE_CIDR: u32 = 100;

/// `Domain.type`
pub const DOMAIN_TYPE: u32 = 1;
/// `Domain.value`
pub const DOMAIN_VALUE: u32 = 2;
/// `Domain.attribute`
pub const DOMAIN_ATTRIBUTE: u32 = 3;

/// `Attribute.key`
pub const ATTRIBUTE_KEY: u32 = 1;
/// `Attribute.bool_value`
pub const ATTRIBUTE_BOOL_VALUE: u32 = 2;

/// `CIDR.ip_addr`
pub const CIDR_IP_ADDR: u32 = 1;
/// `CIDR.prefix`
pub const CIDR_PREFIX: u32 = 2;

/// Domain matching variant as stored in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DomainType {
    /// Substring match (keyword rules)
    #[default]
    Plain = 0,
    /// Regular expression
    Regex = 1,
    /// Domain and subdomains
    RootDomain = 2,
    /// Exact domain
    Full = 3,
}

impl DomainType {
    /// Convert from a wire value.
    ///
    /// Returns `None` for unknown values.
    pub fn from_u64(v: u64) -> Option<Self> {
        match v {
            0 => Some(DomainType::Plain),
            1 => Some(DomainType::Regex),
            2 => Some(DomainType::RootDomain),
            3 => Some(DomainType::Full),
            _ => None,
        }
    }

    /// Convert to a wire value.
    pub fn as_u64(self) -> u64 {
        self as u64
    }

    /// Prefix that spells this variant in list syntax.
    pub fn list_prefix(&self) -> &'static str {
        match self {
            DomainType::Plain => "keyword:",
            DomainType::Regex => "regexp:",
            DomainType::RootDomain => "",
            DomainType::Full => "full:",
        }
    }
}

/// One domain-typed rule of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainEntry {
    pub domain_type: DomainType,
    pub value: String,
    /// Attribute keys, each stored with `bool_value = true`
    pub attributes: Vec<String>,
}

/// One network range of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CidrEntry {
    /// 4 or 16 address bytes, network order
    pub ip: Vec<u8>,
    pub prefix: u32,
}

impl CidrEntry {
    /// Build from an address and prefix length.
    pub fn new(ip: IpAddr, prefix: u8) -> Self {
        let ip = match ip {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        };
        Self {
            ip,
            prefix: prefix as u32,
        }
    }

    /// Decode the address bytes.
    pub fn addr(&self) -> Result<IpAddr> {
        match self.ip.len() {
            4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&self.ip);
                Ok(IpAddr::from(octets))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&self.ip);
                Ok(IpAddr::from(octets))
            }
            n => Err(Error::Decode(format!("invalid CIDR address length {}", n))),
        }
    }
}

/// One output record, keyed by country code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Uppercased list identifier
    pub country_code: String,
    pub domains: Vec<DomainEntry>,
    pub cidrs: Vec<CidrEntry>,
}

/// Append a base-128 varint.
pub fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Append a field key.
pub fn put_key(buf: &mut Vec<u8>, field: u32, wire_type: u8) {
    put_varint(buf, ((field as u64) << 3) | wire_type as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding() {
        let mut buf = Vec::new();
        put_varint(&mut buf, 1);
        assert_eq!(buf, [0x01]);

        buf.clear();
        put_varint(&mut buf, 300);
        assert_eq!(buf, [0xac, 0x02]);

        buf.clear();
        put_varint(&mut buf, u64::MAX);
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn test_key_encoding() {
        let mut buf = Vec::new();
        put_key(&mut buf, LIST_ENTRY, WIRE_LEN);
        assert_eq!(buf, [0x0a]);
    }

    #[test]
    fn test_domain_type_from_u64() {
        assert_eq!(DomainType::from_u64(0), Some(DomainType::Plain));
        assert_eq!(DomainType::from_u64(2), Some(DomainType::RootDomain));
        assert_eq!(DomainType::from_u64(3), Some(DomainType::Full));
        assert_eq!(DomainType::from_u64(4), None);
    }

    #[test]
    fn test_domain_type_list_prefix() {
        assert_eq!(DomainType::RootDomain.list_prefix(), "");
        assert_eq!(DomainType::Full.list_prefix(), "full:");
        assert_eq!(DomainType::Plain.list_prefix(), "keyword:");
        assert_eq!(DomainType::Regex.list_prefix(), "regexp:");
    }

    #[test]
    fn test_cidr_entry_addr() {
        let entry = CidrEntry::new("10.0.0.0".parse().unwrap(), 8);
        assert_eq!(entry.ip, vec![10, 0, 0, 0]);
        assert_eq!(entry.addr().unwrap(), "10.0.0.0".parse::<IpAddr>().unwrap());

        let bad = CidrEntry {
            ip: vec![1, 2, 3],
            prefix: 8,
        };
        assert!(bad.addr().is_err());
    }
}
