//! IP CIDR value parsing.

use ipnet::IpNet;

/// Parse a CIDR rule value.
///
/// Supports both IPv4 and IPv6 notation. A bare address without a prefix
/// length is rejected.
///
/// # Examples
/// ```
/// use geosite::rule::parse_cidr;
///
/// assert!(parse_cidr("192.168.0.0/16").is_some());
/// assert!(parse_cidr("fc00::/7").is_some());
/// assert!(parse_cidr("192.168.1.1").is_none());
/// ```
pub fn parse_cidr(value: &str) -> Option<IpNet> {
    let value = value.trim();
    if !value.contains('/') {
        return None;
    }
    value.parse::<IpNet>().ok()
}
