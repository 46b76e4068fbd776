//! Rule kind definitions.

use std::fmt;

/// RuleKind represents how a rule value is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    /// Domain and all of its subdomains
    Domain,
    /// Exact domain only
    Full,
    /// Substring of the domain
    Keyword,
    /// Regular expression over the domain
    Regex,
    /// IPv4 or IPv6 network range
    Cidr,
}

impl RuleKind {
    /// Value prefixes that select a kind explicitly.
    pub const PREFIXES: [(&'static str, RuleKind); 4] = [
        ("domain:", RuleKind::Domain),
        ("full:", RuleKind::Full),
        ("keyword:", RuleKind::Keyword),
        ("regexp:", RuleKind::Regex),
    ];

    /// Split a known kind prefix off a rule body.
    ///
    /// Returns `None` when the body carries no recognised prefix.
    pub fn strip_prefix(body: &str) -> Option<(Self, &str)> {
        Self::PREFIXES
            .iter()
            .find_map(|(prefix, kind)| body.strip_prefix(prefix).map(|rest| (*kind, rest)))
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Domain => "domain",
            RuleKind::Full => "full",
            RuleKind::Keyword => "keyword",
            RuleKind::Regex => "regexp",
            RuleKind::Cidr => "cidr",
        }
    }

    /// Whether the value is case-folded at parse time.
    pub fn folds_case(&self) -> bool {
        matches!(self, RuleKind::Domain | RuleKind::Full | RuleKind::Keyword)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
