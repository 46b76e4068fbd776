//! Rule values and attribute handling.

mod cidr;
mod filter;

pub use cidr::parse_cidr;
pub use filter::AttributeFilter;

use std::collections::BTreeSet;
use std::fmt;

use crate::RuleKind;

/// Ordered set of attribute tags attached to a rule.
pub type Attributes = BTreeSet<String>;

/// A single matching unit parsed from a list file.
///
/// Equality covers kind, value and attributes; two rules that compare equal
/// collapse to one when a list is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// How the value is matched
    pub kind: RuleKind,
    /// Non-empty rule value
    pub value: String,
    /// Attribute tags
    pub attributes: Attributes,
}

impl Rule {
    /// Create a rule without attributes.
    pub fn new(kind: RuleKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    /// Attach attribute tags.
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(attributes.into_iter().map(Into::into));
        self
    }

    /// Check whether the rule carries an attribute.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RuleKind::Domain | RuleKind::Cidr => write!(f, "{}", self.value)?,
            kind => write!(f, "{}:{}", kind, self.value)?,
        }
        for attribute in &self.attributes {
            write!(f, " @{}", attribute)?;
        }
        Ok(())
    }
}
