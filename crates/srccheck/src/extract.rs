//! Line-oriented text extraction of qualified symbol usages and system includes.
//!
//! This is pattern matching on raw lines, not C++ parsing. Comments, string
//! literals and disabled preprocessor branches are scanned like any other
//! text, so a `std::` name inside a comment counts as a usage. Callers accept
//! that false-positive/false-negative risk.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// One or more `std::` / `boost::` qualifiers followed by an identifier.
static USAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:std|boost)::[\w:]+)").expect("valid usage regex"));

/// Angle-bracket includes only; quoted includes are local project headers.
static INCLUDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#include <([\w/.]+)>").expect("valid include regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    pub symbol: String,
    /// 1-based line of first occurrence.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub header: String,
    /// 1-based line of first occurrence.
    pub line: usize,
}

/// Distinct qualified symbols referenced in `text`, in first-seen order.
#[must_use]
pub fn usages(text: &str) -> Vec<Usage> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        for cap in USAGE_PATTERN.captures_iter(line) {
            let symbol = &cap[1];
            if seen.insert(symbol.to_string()) {
                found.push(Usage {
                    symbol: symbol.to_string(),
                    line: idx + 1,
                });
            }
        }
    }
    found
}

/// Distinct headers named by `#include <...>` directives in `text`, in
/// first-seen order.
#[must_use]
pub fn includes(text: &str) -> Vec<Include> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        for cap in INCLUDE_PATTERN.captures_iter(line) {
            let header = &cap[1];
            if seen.insert(header.to_string()) {
                found.push(Include {
                    header: header.to_string(),
                    line: idx + 1,
                });
            }
        }
    }
    found
}
