//! Container writer.

use super::format::*;

/// Encodes entries into the container format.
///
/// Default proto3 values are omitted and fields are written in field-number
/// order, so equal input always produces equal bytes.
pub struct GeoSiteWriter {
    buffer: Vec<u8>,
    scratch: Vec<u8>,
}

impl GeoSiteWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024 * 1024), // 1MB initial
            scratch: Vec::new(),
        }
    }

    /// Encode entries in the given order.
    pub fn write(&mut self, entries: &[Entry]) -> Vec<u8> {
        self.buffer.clear();

        for entry in entries {
            self.scratch.clear();
            encode_entry(&mut self.scratch, entry);
            put_bytes(&mut self.buffer, LIST_ENTRY, &self.scratch);
        }

        std::mem::take(&mut self.buffer)
    }
}

impl Default for GeoSiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_entry(buf: &mut Vec<u8>, entry: &Entry) {
    put_string(buf, SITE_COUNTRY_CODE, &entry.country_code);

    let mut message = Vec::new();
    for domain in &entry.domains {
        message.clear();
        encode_domain(&mut message, domain);
        put_bytes(buf, SITE_DOMAIN, &message);
    }
    for cidr in &entry.cidrs {
        message.clear();
        encode_cidr(&mut message, cidr);
        put_bytes(buf, SITE_CIDR, &message);
    }
}

fn encode_domain(buf: &mut Vec<u8>, domain: &DomainEntry) {
    put_uint(buf, DOMAIN_TYPE, domain.domain_type.as_u64());
    put_string(buf, DOMAIN_VALUE, &domain.value);

    let mut attribute = Vec::new();
    for key in &domain.attributes {
        attribute.clear();
        put_string(&mut attribute, ATTRIBUTE_KEY, key);
        put_uint(&mut attribute, ATTRIBUTE_BOOL_VALUE, 1);
        put_bytes(buf, DOMAIN_ATTRIBUTE, &attribute);
    }
}

fn encode_cidr(buf: &mut Vec<u8>, cidr: &CidrEntry) {
    put_bytes(buf, CIDR_IP_ADDR, &cidr.ip);
    put_uint(buf, CIDR_PREFIX, cidr.prefix as u64);
}

fn put_uint(buf: &mut Vec<u8>, field: u32, value: u64) {
    if value == 0 {
        return;
    }
    put_key(buf, field, WIRE_VARINT);
    put_varint(buf, value);
}

fn put_string(buf: &mut Vec<u8>, field: u32, value: &str) {
    if value.is_empty() {
        return;
    }
    put_bytes(buf, field, value.as_bytes());
}

fn put_bytes(buf: &mut Vec<u8>, field: u32, value: &[u8]) {
    put_key(buf, field, WIRE_LEN);
    put_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_empty_list() {
        let mut writer = GeoSiteWriter::new();
        assert!(writer.write(&[]).is_empty());
    }

    #[test]
    fn test_write_known_bytes() {
        let entry = Entry {
            country_code: "CN".to_string(),
            domains: vec![DomainEntry {
                domain_type: DomainType::RootDomain,
                value: "a.cn".to_string(),
                attributes: vec!["ads".to_string()],
            }],
            cidrs: vec![CidrEntry {
                ip: vec![10, 0, 0, 0],
                prefix: 8,
            }],
        };

        let mut writer = GeoSiteWriter::new();
        let data = writer.write(&[entry]);

        let expected: Vec<u8> = vec![
            0x0a, 0x22, // entry, len 34
            0x0a, 0x02, b'C', b'N', // country_code
            0x12, 0x11, // domain, len 17
            0x08, 0x02, // type = RootDomain
            0x12, 0x04, b'a', b'.', b'c', b'n', // value
            0x1a, 0x07, // attribute, len 7
            0x0a, 0x03, b'a', b'd', b's', // key
            0x10, 0x01, // bool_value = true
            0xa2, 0x06, 0x08, // cidr (field 100), len 8
            0x0a, 0x04, 10, 0, 0, 0, // ip_addr
            0x10, 0x08, // prefix
        ];
        assert_eq!(data, expected);
    }

    #[test]
    fn test_plain_type_is_omitted() {
        let entry = Entry {
            country_code: "X".to_string(),
            domains: vec![DomainEntry {
                domain_type: DomainType::Plain,
                value: "k".to_string(),
                attributes: Vec::new(),
            }],
            cidrs: Vec::new(),
        };

        let mut writer = GeoSiteWriter::new();
        let data = writer.write(&[entry]);

        // entry { country_code "X", domain { value "k" } }
        assert_eq!(data, vec![0x0a, 0x08, 0x0a, 0x01, b'X', 0x12, 0x03, 0x12, 0x01, b'k']);
    }

    #[test]
    fn test_writer_is_reusable() {
        let entry = Entry {
            country_code: "US".to_string(),
            ..Entry::default()
        };
        let mut writer = GeoSiteWriter::new();
        let first = writer.write(std::slice::from_ref(&entry));
        let second = writer.write(std::slice::from_ref(&entry));
        assert_eq!(first, second);
    }
}
