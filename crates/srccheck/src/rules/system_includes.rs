//! Include obligation check.
//!
//! A file's angle-bracket includes must be exactly the set of headers its
//! qualified `std::` / `boost::` usages require according to the
//! [`KnowledgeBase`]: nothing missing, nothing extra.
//!
//! The strict-equality policy assumes usage extraction has no false
//! negatives. A symbol reached only through a wrapper macro or a templated
//! indirection is invisible to the extractor, so its legitimately needed
//! header is reported as excess.

use crate::context::FileCtx;
use crate::extract;
use crate::knowledge::KnowledgeBase;
use crate::types::{Location, Outcome, Severity, Violation};
use std::collections::HashSet;

pub const NAME: &str = "system-includes";

/// One include-obligation violation. `Display` renders the reported message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncludeDiagnostic {
    /// The symbol has no entry in the knowledge base.
    #[error("No include mapping for {symbol}")]
    UnknownSymbol { symbol: String, line: usize },

    /// The symbol's header is not included. Reported per symbol, so two
    /// symbols from the same missing header yield two diagnostics.
    #[error("{symbol} requires include {header}")]
    MissingInclude {
        symbol: String,
        header: String,
        line: usize,
    },

    /// The header is included but no detected usage requires it.
    #[error("{header} included but not required")]
    ExcessInclude { header: String, line: usize },
}

impl IncludeDiagnostic {
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownSymbol { line, .. }
            | Self::MissingInclude { line, .. }
            | Self::ExcessInclude { line, .. } => *line,
        }
    }
}

/// Outcome of checking one file's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub diagnostics: Vec<IncludeDiagnostic>,
}

impl Verdict {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.diagnostics.is_empty() {
            Outcome::Success
        } else {
            Outcome::Fail
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome().is_success()
    }
}

/// Reconciles the includes found in `text` against the headers its usages
/// require.
///
/// Usage diagnostics (unknown or missing) come first in first-seen order,
/// followed by excess includes in the order they appear in the file.
#[must_use]
pub fn check(knowledge: &KnowledgeBase, text: &str) -> Verdict {
    let found = extract::includes(text);
    let found_headers: HashSet<&str> = found.iter().map(|i| i.header.as_str()).collect();

    let mut required: HashSet<&str> = HashSet::new();
    let mut diagnostics = Vec::new();

    for usage in extract::usages(text) {
        let Some(header) = knowledge.lookup(&usage.symbol) else {
            diagnostics.push(IncludeDiagnostic::UnknownSymbol {
                symbol: usage.symbol,
                line: usage.line,
            });
            continue;
        };

        required.insert(header);
        if !found_headers.contains(header) {
            diagnostics.push(IncludeDiagnostic::MissingInclude {
                symbol: usage.symbol,
                header: header.to_string(),
                line: usage.line,
            });
        }
    }

    for include in &found {
        if !required.contains(include.header.as_str()) {
            diagnostics.push(IncludeDiagnostic::ExcessInclude {
                header: include.header.clone(),
                line: include.line,
            });
        }
    }

    Verdict { diagnostics }
}

pub struct SystemIncludes<'kb> {
    pub knowledge: &'kb KnowledgeBase,
    pub severity: Severity,
}

impl<'kb> SystemIncludes<'kb> {
    #[must_use]
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self {
            knowledge,
            severity: Severity::Error,
        }
    }

    pub fn check(&self, ctx: &FileCtx<'_>) -> Vec<Violation> {
        check(self.knowledge, ctx.content)
            .diagnostics
            .into_iter()
            .map(|d| {
                Violation::new(
                    NAME,
                    self.severity,
                    Location::new(ctx.relative_path.clone(), d.line()),
                    d.to_string(),
                )
            })
            .collect()
    }
}
