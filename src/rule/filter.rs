//! Attribute filters applied at include boundaries.

use super::{Attributes, Rule};

/// Filter attached to an `include:` directive.
///
/// A rule passes when it carries at least one of the wanted tags (or no tags
/// are wanted) and none of the excluded tags. Filtering never touches the
/// included list itself, so one resolved list can serve many differently
/// filtered includers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    wanted: Attributes,
    excluded: Attributes,
}

impl AttributeFilter {
    /// Filter that keeps every rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw tags; a leading `-` marks an excluded tag.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut filter = Self::new();
        for tag in tags {
            match tag.strip_prefix('-') {
                Some(excluded) => filter.excluded.insert(excluded.to_string()),
                None => filter.wanted.insert(tag.to_string()),
            };
        }
        filter
    }

    /// Whether this filter keeps everything.
    pub fn is_empty(&self) -> bool {
        self.wanted.is_empty() && self.excluded.is_empty()
    }

    /// Tags of which a rule must carry at least one.
    pub fn wanted(&self) -> &Attributes {
        &self.wanted
    }

    /// Tags a rule must not carry.
    pub fn excluded(&self) -> &Attributes {
        &self.excluded
    }

    /// Check a rule against the filter.
    pub fn matches(&self, rule: &Rule) -> bool {
        let wanted = self.wanted.is_empty() || !self.wanted.is_disjoint(&rule.attributes);
        wanted && self.excluded.is_disjoint(&rule.attributes)
    }

    /// Iterate the rules that pass, preserving order.
    pub fn apply<'a>(&'a self, rules: &'a [Rule]) -> impl Iterator<Item = &'a Rule> + 'a {
        rules.iter().filter(move |rule| self.matches(rule))
    }
}
