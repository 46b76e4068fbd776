//! Container reader.

use std::fs;
use std::path::Path;

use super::format::*;
use crate::{Error, Result};

/// Decoded container.
///
/// Unknown fields are skipped, so containers written by other producers of
/// the same schema can be read as long as the known fields are well formed.
pub struct GeoSiteReader {
    entries: Vec<Entry>,
}

impl GeoSiteReader {
    /// Read and decode a container file.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Decode a container from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut cursor = Cursor::new(data);
        while !cursor.is_empty() {
            let (field, wire_type) = cursor.key()?;
            match (field, wire_type) {
                (LIST_ENTRY, WIRE_LEN) => entries.push(decode_entry(cursor.bytes()?)?),
                _ => cursor.skip(wire_type)?,
            }
        }
        Ok(Self { entries })
    }

    /// All entries in stored order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Find an entry by country code (case-insensitive).
    pub fn entry(&self, code: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.country_code.eq_ignore_ascii_case(code))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the container has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decode_entry(data: &[u8]) -> Result<Entry> {
    let mut entry = Entry::default();
    let mut cursor = Cursor::new(data);
    while !cursor.is_empty() {
        let (field, wire_type) = cursor.key()?;
        match (field, wire_type) {
            (SITE_COUNTRY_CODE, WIRE_LEN) => entry.country_code = cursor.string()?,
            (SITE_DOMAIN, WIRE_LEN) => entry.domains.push(decode_domain(cursor.bytes()?)?),
            (SITE_CIDR, WIRE_LEN) => entry.cidrs.push(decode_cidr(cursor.bytes()?)?),
            _ => cursor.skip(wire_type)?,
        }
    }
    Ok(entry)
}

fn decode_domain(data: &[u8]) -> Result<DomainEntry> {
    let mut domain = DomainEntry::default();
    let mut cursor = Cursor::new(data);
    while !cursor.is_empty() {
        let (field, wire_type) = cursor.key()?;
        match (field, wire_type) {
            (DOMAIN_TYPE, WIRE_VARINT) => {
                let raw = cursor.varint()?;
                domain.domain_type = DomainType::from_u64(raw)
                    .ok_or_else(|| Error::Decode(format!("unknown domain type {}", raw)))?;
            }
            (DOMAIN_VALUE, WIRE_LEN) => domain.value = cursor.string()?,
            (DOMAIN_ATTRIBUTE, WIRE_LEN) => {
                domain.attributes.push(decode_attribute_key(cursor.bytes()?)?)
            }
            _ => cursor.skip(wire_type)?,
        }
    }
    Ok(domain)
}

fn decode_attribute_key(data: &[u8]) -> Result<String> {
    let mut key = String::new();
    let mut cursor = Cursor::new(data);
    while !cursor.is_empty() {
        let (field, wire_type) = cursor.key()?;
        match (field, wire_type) {
            (ATTRIBUTE_KEY, WIRE_LEN) => key = cursor.string()?,
            _ => cursor.skip(wire_type)?,
        }
    }
    Ok(key)
}

fn decode_cidr(data: &[u8]) -> Result<CidrEntry> {
    let mut cidr = CidrEntry::default();
    let mut cursor = Cursor::new(data);
    while !cursor.is_empty() {
        let (field, wire_type) = cursor.key()?;
        match (field, wire_type) {
            (CIDR_IP_ADDR, WIRE_LEN) => cidr.ip = cursor.bytes()?.to_vec(),
            (CIDR_PREFIX, WIRE_VARINT) => {
                let raw = cursor.varint()?;
                cidr.prefix = u32::try_from(raw)
                    .map_err(|_| Error::Decode(format!("CIDR prefix out of range: {}", raw)))?;
            }
            _ => cursor.skip(wire_type)?,
        }
    }
    Ok(cidr)
}

/// Forward-only reader over protobuf wire data.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn varint(&mut self) -> Result<u64> {
        let mut value = 0u64;
        for shift in (0..64).step_by(7) {
            let byte = *self
                .data
                .get(self.pos)
                .ok_or_else(|| Error::Decode("truncated varint".to_string()))?;
            self.pos += 1;
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(Error::Decode("varint too long".to_string()))
    }

    fn key(&mut self) -> Result<(u32, u8)> {
        let key = self.varint()?;
        let field = u32::try_from(key >> 3)
            .map_err(|_| Error::Decode(format!("field number out of range: {}", key >> 3)))?;
        if field == 0 {
            return Err(Error::Decode("field number 0".to_string()));
        }
        Ok((field, (key & 0x07) as u8))
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                Error::Decode(format!(
                    "truncated field: need {} bytes at offset {}",
                    len, self.pos
                ))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.varint()?;
        let len = usize::try_from(len)
            .map_err(|_| Error::Decode(format!("length out of range: {}", len)))?;
        self.take(len)
    }

    fn string(&mut self) -> Result<String> {
        let bytes = self.bytes()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Decode(format!("invalid UTF-8 string: {}", e)))
    }

    fn skip(&mut self, wire_type: u8) -> Result<()> {
        match wire_type {
            WIRE_VARINT => self.varint().map(|_| ()),
            WIRE_FIXED64 => self.take(8).map(|_| ()),
            WIRE_LEN => self.bytes().map(|_| ()),
            WIRE_FIXED32 => self.take(4).map(|_| ()),
            other => Err(Error::Decode(format!("unsupported wire type {}", other))),
        }
    }
}
