//! Container format tests.
//!
//! These check that what the writer produces is what the reader sees, and
//! that the reader tolerates unknown fields and rejects damaged input.

use super::format::*;
use super::reader::GeoSiteReader;
use super::writer::GeoSiteWriter;

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry {
            country_code: "CN".to_string(),
            domains: vec![
                DomainEntry {
                    domain_type: DomainType::RootDomain,
                    value: "example.cn".to_string(),
                    attributes: vec!["ads".to_string(), "cn".to_string()],
                },
                DomainEntry {
                    domain_type: DomainType::Plain,
                    value: "baidu".to_string(),
                    attributes: Vec::new(),
                },
                DomainEntry {
                    domain_type: DomainType::Regex,
                    value: r"^ad\d+\.example\.cn$".to_string(),
                    attributes: Vec::new(),
                },
            ],
            cidrs: vec![
                CidrEntry::new("1.2.3.0".parse().unwrap(), 24),
                CidrEntry::new("2001:db8::".parse().unwrap(), 32),
            ],
        },
        Entry {
            country_code: "GOOGLE".to_string(),
            domains: vec![DomainEntry {
                domain_type: DomainType::Full,
                value: "www.google.com".to_string(),
                attributes: Vec::new(),
            }],
            cidrs: Vec::new(),
        },
    ]
}

#[test]
fn test_written_entries_read_back() {
    let entries = sample_entries();
    let data = GeoSiteWriter::new().write(&entries);
    let reader = GeoSiteReader::from_bytes(&data).unwrap();

    assert_eq!(reader.entries(), entries.as_slice());
}

#[test]
fn test_lookup_by_country_code() {
    let data = GeoSiteWriter::new().write(&sample_entries());
    let reader = GeoSiteReader::from_bytes(&data).unwrap();

    let google = reader.entry("google").unwrap();
    assert_eq!(google.domains[0].value, "www.google.com");
    assert!(reader.entry("us").is_none());
}

#[test]
fn test_empty_container() {
    let reader = GeoSiteReader::from_bytes(&[]).unwrap();
    assert!(reader.is_empty());
}

#[test]
fn test_unknown_fields_are_skipped() {
    let mut data = GeoSiteWriter::new().write(&sample_entries());

    // field 9, varint
    put_key(&mut data, 9, WIRE_VARINT);
    put_varint(&mut data, 42);
    // field 10, fixed32
    put_key(&mut data, 10, WIRE_FIXED32);
    data.extend_from_slice(&[1, 2, 3, 4]);
    // field 11, length-delimited
    put_key(&mut data, 11, WIRE_LEN);
    put_varint(&mut data, 2);
    data.extend_from_slice(b"zz");

    let reader = GeoSiteReader::from_bytes(&data).unwrap();
    assert_eq!(reader.len(), 2);
}

#[test]
fn test_truncated_input_is_rejected() {
    let data = GeoSiteWriter::new().write(&sample_entries());

    for cut in [1, data.len() / 2, data.len() - 1] {
        assert!(
            GeoSiteReader::from_bytes(&data[..cut]).is_err(),
            "truncation at {} accepted",
            cut
        );
    }
}

#[test]
fn test_unknown_domain_type_is_rejected() {
    let mut domain = Vec::new();
    put_key(&mut domain, DOMAIN_TYPE, WIRE_VARINT);
    put_varint(&mut domain, 7);

    let mut entry = Vec::new();
    put_key(&mut entry, SITE_DOMAIN, WIRE_LEN);
    put_varint(&mut entry, domain.len() as u64);
    entry.extend_from_slice(&domain);

    let mut data = Vec::new();
    put_key(&mut data, LIST_ENTRY, WIRE_LEN);
    put_varint(&mut data, entry.len() as u64);
    data.extend_from_slice(&entry);

    assert!(GeoSiteReader::from_bytes(&data).is_err());
}

#[test]
fn test_cidr_addresses_decode() {
    let data = GeoSiteWriter::new().write(&sample_entries());
    let reader = GeoSiteReader::from_bytes(&data).unwrap();
    let cn = reader.entry("CN").unwrap();

    let v4 = cn.cidrs[0].addr().unwrap();
    assert_eq!(v4.to_string(), "1.2.3.0");
    assert_eq!(cn.cidrs[0].prefix, 24);

    let v6 = cn.cidrs[1].addr().unwrap();
    assert_eq!(v6.to_string(), "2001:db8::");
    assert_eq!(cn.cidrs[1].prefix, 32);
}

#[test]
fn test_output_is_deterministic() {
    let first = GeoSiteWriter::new().write(&sample_entries());
    let second = GeoSiteWriter::new().write(&sample_entries());
    assert_eq!(first, second);
}

#[test]
fn test_resource_hash_is_not_read_as_cidr() {
    let mut entry = Vec::new();
    put_key(&mut entry, SITE_COUNTRY_CODE, WIRE_LEN);
    put_varint(&mut entry, 2);
    entry.extend_from_slice(b"CN");
    put_key(&mut entry, SITE_RESOURCE_HASH, WIRE_LEN);
    put_varint(&mut entry, 4);
    entry.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    let mut data = Vec::new();
    put_key(&mut data, LIST_ENTRY, WIRE_LEN);
    put_varint(&mut data, entry.len() as u64);
    data.extend_from_slice(&entry);

    let reader = GeoSiteReader::from_bytes(&data).unwrap();
    let cn = reader.entry("CN").unwrap();
    assert!(cn.cidrs.is_empty());
}

#[test]
fn test_cidrs_use_unassigned_site_field() {
    let entry = Entry {
        country_code: "CN".to_string(),
        domains: Vec::new(),
        cidrs: vec![CidrEntry::new("10.0.0.0".parse().unwrap(), 8)],
    };
    let data = GeoSiteWriter::new().write(&[entry]);

    // entry header (2) + country_code (4), then the cidr key
    let mut key = Vec::new();
    put_key(&mut key, SITE_CIDR, WIRE_LEN);
    assert_eq!(key, vec![0xa2, 0x06]);
    assert_eq!(&data[6..8], key.as_slice());
}
