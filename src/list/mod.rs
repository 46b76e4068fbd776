//! Parsed list representation.

mod parser;

pub use parser::{Directive, ListParser};

use crate::rule::{AttributeFilter, Rule};

/// An `include:` directive pulling another list into this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// Normalized identifier of the included list
    pub target: String,
    /// Filter applied to the included rules
    pub filter: AttributeFilter,
}

impl Include {
    /// Include every rule of `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            filter: AttributeFilter::new(),
        }
    }

    /// Include the rules of `target` that pass `filter`.
    pub fn filtered(target: impl Into<String>, filter: AttributeFilter) -> Self {
        Self {
            target: target.into(),
            filter,
        }
    }
}

/// One list as read from its source files, before includes are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    /// Normalized identifier
    pub name: String,
    /// Own rules in file order
    pub rules: Vec<Rule>,
    /// Include directives in file order
    pub includes: Vec<Include>,
}

impl List {
    /// Create an empty list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A list with every include expanded and duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedList {
    /// Normalized identifier
    pub name: String,
    /// Deduplicated rules in first-seen order
    pub rules: Vec<Rule>,
}

impl ResolvedList {
    /// Rule values in resolved order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.value.as_str())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether the list resolved to nothing.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
