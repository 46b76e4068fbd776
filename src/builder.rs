//! Maps resolved lists onto container entries.

use crate::binary::{CidrEntry, DomainEntry, DomainType, Entry};
use crate::list::ResolvedList;
use crate::rule::{parse_cidr, Rule};
use crate::{Error, Result, RuleKind};

/// Build the container entry for a resolved list.
///
/// Domain-like rules keep their resolved order in `domains`, CIDR rules in
/// `cidrs`. Attribute tags are carried on domain rules only; the CIDR message
/// has no room for them.
pub fn build_entry(list: &ResolvedList) -> Result<Entry> {
    let mut entry = Entry {
        country_code: list.name.to_uppercase(),
        ..Entry::default()
    };

    for rule in &list.rules {
        match rule.kind {
            RuleKind::Cidr => entry.cidrs.push(cidr_entry(rule)?),
            kind => entry.domains.push(DomainEntry {
                domain_type: domain_type(kind),
                value: rule.value.clone(),
                attributes: rule.attributes.iter().cloned().collect(),
            }),
        }
    }

    Ok(entry)
}

/// Container variant for a domain-like rule kind.
pub fn domain_type(kind: RuleKind) -> DomainType {
    match kind {
        RuleKind::Keyword => DomainType::Plain,
        RuleKind::Regex => DomainType::Regex,
        RuleKind::Full => DomainType::Full,
        RuleKind::Domain | RuleKind::Cidr => DomainType::RootDomain,
    }
}

fn cidr_entry(rule: &Rule) -> Result<CidrEntry> {
    let net = parse_cidr(&rule.value)
        .ok_or_else(|| Error::Schema(format!("invalid CIDR value: {}", rule.value)))?;
    Ok(CidrEntry::new(net.network(), net.prefix_len()))
}
