//! List file parser.
//!
//! Each non-blank, non-comment line is either a rule or an include:
//!
//! ```text
//! # comment
//! example.com                  # domain and subdomains
//! full:www.example.com @ads    # exact domain, tagged
//! keyword:google
//! regexp:^ad[0-9]+\.example\.net$
//! 10.0.0.0/8@private
//! include:cn@ads,-test         # rules of `cn` tagged `ads`, minus `test`
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use super::{Include, List};
use crate::index::normalize_name;
use crate::rule::{parse_cidr, AttributeFilter, Rule};
use crate::{Error, Result, RuleKind};

const COMMENT: char = '#';
const ATTRIBUTE: char = '@';
const INCLUDE: &str = "include:";

/// A classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Rule(Rule),
    Include(Include),
}

/// List file parser.
pub struct ListParser;

impl ListParser {
    /// Parse every source file of a list, in order, as one list.
    ///
    /// Stops at the first malformed line.
    pub fn parse_files(name: &str, paths: &[PathBuf]) -> Result<List> {
        let mut list = List::new(normalize_name(name));
        for path in paths {
            let file = File::open(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            Self::parse_into(&mut list, file, path)?;
        }
        log::debug!(
            "Parsed list '{}': {} rules, {} includes from {} files",
            list.name,
            list.rules.len(),
            list.includes.len(),
            paths.len()
        );
        Ok(list)
    }

    /// Append the lines of one source to `list`.
    ///
    /// `path` is only used for error reporting.
    pub fn parse_into<R: Read>(list: &mut List, reader: R, path: &Path) -> Result<()> {
        let buf_reader = BufReader::new(reader);

        for (idx, raw) in buf_reader.split(b'\n').enumerate() {
            let mut raw = raw.map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    return Err(Error::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                        reason: "invalid UTF-8".to_string(),
                    });
                }
            };
            match Self::parse_line(&line) {
                Ok(Some(Directive::Rule(rule))) => list.rules.push(rule),
                Ok(Some(Directive::Include(include))) => list.includes.push(include),
                Ok(None) => {}
                Err(reason) => {
                    return Err(Error::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        content: line,
                        reason,
                    });
                }
            }
        }

        Ok(())
    }

    /// Classify a single line.
    ///
    /// Returns `Ok(None)` for blank and comment lines and `Err` with a reason
    /// for anything that is neither a rule nor an include.
    pub fn parse_line(line: &str) -> std::result::Result<Option<Directive>, String> {
        // Remove comments
        let line = match line.find(COMMENT) {
            Some(idx) => &line[..idx],
            None => line,
        };
        let line = line.trim();

        if line.is_empty() {
            return Ok(None);
        }

        let (body, tags) = split_attributes(line)?;

        if body.chars().any(char::is_whitespace) {
            return Err("unexpected whitespace in value".to_string());
        }

        if let Some(target) = strip_prefix_ignore_case(body, INCLUDE) {
            let target = normalize_name(target);
            if target.is_empty() {
                return Err("include without a list name".to_string());
            }
            let filter = AttributeFilter::from_tags(tags.iter().map(String::as_str));
            return Ok(Some(Directive::Include(Include::filtered(target, filter))));
        }

        if let Some(tag) = tags.iter().find(|t| t.starts_with('-')) {
            return Err(format!("negated attribute '{}' outside include", tag));
        }

        let (kind, value) = classify(body)?;
        if value.is_empty() {
            return Err("empty value".to_string());
        }

        let value = if kind.folds_case() {
            value.to_lowercase()
        } else {
            value.to_string()
        };

        Ok(Some(Directive::Rule(Rule::new(kind, value).with_attributes(tags))))
    }
}

/// Split `body@tag1,tag2` (or `body @tag1 @tag2`) into body and tags.
fn split_attributes(line: &str) -> std::result::Result<(&str, Vec<String>), String> {
    let Some(idx) = line.find(ATTRIBUTE) else {
        return Ok((line, Vec::new()));
    };

    let tags: Vec<String> = line[idx + 1..]
        .split(|c: char| c == ',' || c == ATTRIBUTE || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tags.is_empty() || tags.iter().any(|t| t == "-") {
        return Err("empty attribute".to_string());
    }

    Ok((line[..idx].trim(), tags))
}

/// Derive the rule kind from the value syntax.
fn classify(body: &str) -> std::result::Result<(RuleKind, &str), String> {
    if let Some((kind, value)) = RuleKind::strip_prefix(body) {
        return Ok((kind, value));
    }

    if body.contains('/') {
        return match parse_cidr(body) {
            Some(_) => Ok((RuleKind::Cidr, body)),
            None => Err("invalid CIDR".to_string()),
        };
    }

    if body.contains(':') {
        return Err("unknown directive".to_string());
    }

    Ok((RuleKind::Domain, body))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&s[prefix.len()..]),
        _ => None,
    }
}
