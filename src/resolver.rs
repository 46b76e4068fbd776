//! Include resolution.
//!
//! Expands `include:` directives into a flat, deduplicated rule sequence per
//! list. Expansion walks the include graph with an explicit stack instead of
//! recursion, so deep include chains cannot exhaust the call stack. Every list
//! is parsed and resolved at most once per [`Resolver`].

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::index::{normalize_name, FileIndex};
use crate::list::{List, ListParser, ResolvedList};
use crate::rule::Rule;
use crate::{Error, Result};

/// A list whose includes are being expanded.
struct Frame {
    name: String,
    list: Arc<List>,
    /// Index of the next include to expand
    next_include: usize,
    rules: Vec<Rule>,
}

/// Memoizing include resolver over a [`FileIndex`].
pub struct Resolver<'a> {
    index: &'a FileIndex,
    parsed: AHashMap<String, Arc<List>>,
    resolved: AHashMap<String, Arc<ResolvedList>>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver reading lists from `index`.
    pub fn new(index: &'a FileIndex) -> Self {
        Self {
            index,
            parsed: AHashMap::new(),
            resolved: AHashMap::new(),
        }
    }

    /// Number of lists parsed so far.
    pub fn parsed_count(&self) -> usize {
        self.parsed.len()
    }

    /// Number of lists resolved so far.
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Get an already resolved list without resolving it.
    pub fn cached(&self, name: &str) -> Option<Arc<ResolvedList>> {
        self.resolved.get(&normalize_name(name)).cloned()
    }

    /// Resolve a list, expanding all of its includes.
    ///
    /// The list's own rules come first, followed by the rules of each include
    /// in directive order, filtered by that include's attributes. Duplicates
    /// are dropped keeping the first occurrence.
    ///
    /// # Errors
    /// - [`Error::UnknownList`] if `name` is not in the index
    /// - [`Error::UndefinedReference`] if an include targets a missing list
    /// - [`Error::CyclicReference`] if the include graph loops
    /// - [`Error::Parse`] if any reached list is malformed
    pub fn resolve(&mut self, name: &str) -> Result<Arc<ResolvedList>> {
        let name = normalize_name(name);
        if let Some(done) = self.resolved.get(&name) {
            return Ok(Arc::clone(done));
        }
        if !self.index.contains(&name) {
            return Err(Error::UnknownList(name));
        }

        let mut visiting = AHashSet::new();
        visiting.insert(name.clone());
        let mut stack = vec![self.open(name)?];

        loop {
            let top = stack.len() - 1;
            let frame = &stack[top];

            if let Some(include) = frame.list.includes.get(frame.next_include) {
                let target = include.target.clone();

                if let Some(done) = self.resolved.get(&target).cloned() {
                    let Frame {
                        list,
                        next_include,
                        rules,
                        ..
                    } = &mut stack[top];
                    let filter = &list.includes[*next_include].filter;
                    rules.extend(filter.apply(&done.rules).cloned());
                    *next_include += 1;
                    continue;
                }

                if !self.index.contains(&target) {
                    return Err(Error::UndefinedReference {
                        from: frame.name.clone(),
                        target,
                    });
                }

                if visiting.contains(&target) {
                    let start = stack.iter().position(|f| f.name == target).unwrap_or(0);
                    let mut path: Vec<String> =
                        stack[start..].iter().map(|f| f.name.clone()).collect();
                    path.push(target);
                    return Err(Error::CyclicReference { path });
                }

                visiting.insert(target.clone());
                let child = self.open(target)?;
                stack.push(child);
                continue;
            }

            // All includes of the top frame are expanded.
            let Some(frame) = stack.pop() else {
                unreachable!("resolver stack is never empty inside the loop");
            };
            visiting.remove(&frame.name);

            let resolved = Arc::new(ResolvedList {
                rules: dedup(frame.rules),
                name: frame.name,
            });
            log::debug!(
                "Resolved list '{}' to {} rules",
                resolved.name,
                resolved.rules.len()
            );
            self.resolved
                .insert(resolved.name.clone(), Arc::clone(&resolved));

            match stack.last_mut() {
                None => return Ok(resolved),
                Some(parent) => {
                    let Frame {
                        list,
                        next_include,
                        rules,
                        ..
                    } = parent;
                    let filter = &list.includes[*next_include].filter;
                    rules.extend(filter.apply(&resolved.rules).cloned());
                    *next_include += 1;
                }
            }
        }
    }

    /// Start expanding a list, parsing it on first use.
    fn open(&mut self, name: String) -> Result<Frame> {
        let list = self.parse(&name)?;
        Ok(Frame {
            rules: list.rules.clone(),
            name,
            list,
            next_include: 0,
        })
    }

    fn parse(&mut self, name: &str) -> Result<Arc<List>> {
        if let Some(list) = self.parsed.get(name) {
            return Ok(Arc::clone(list));
        }
        let paths = self
            .index
            .paths(name)
            .ok_or_else(|| Error::UnknownList(name.to_string()))?;
        let list = Arc::new(ListParser::parse_files(name, paths)?);
        self.parsed.insert(name.to_string(), Arc::clone(&list));
        Ok(list)
    }
}

/// Drop structurally equal rules, keeping the first occurrence.
fn dedup(rules: Vec<Rule>) -> Vec<Rule> {
    let mut seen = AHashSet::with_capacity(rules.len());
    rules
        .into_iter()
        .filter(|rule| seen.insert(rule.clone()))
        .collect()
}
