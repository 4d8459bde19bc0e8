//! Convention checks for a C++ source tree.
//!
//! Rules run per file on raw text; there is no C++ parser behind them:
//!
//! | Rule | Applies to | Description |
//! |------|------------|-------------|
//! | `system-includes` | `.h`, `.cpp` | `#include <...>` set must equal the headers required by `std::`/`boost::` usages |
//! | `header-guard` | `.h` | `#ifndef`/`#define`/`#endif //` guard derived from the relative path |
//! | `test-group` | `*_test.cpp` | `TEST(Group, Name)` group derived from the relative path |
//! | `line-length` | `.h`, `.cpp` | no line longer than 140 chars (configurable) |
//!
//! The include obligation check is backed by a compiled-in
//! [`KnowledgeBase`] mapping every permitted symbol to its header.
//!
//! # Usage
//!
//! ```bash
//! srccheck check .
//! ```

#![forbid(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod context;
pub mod extract;
pub mod knowledge;
pub mod rules;
pub mod types;

pub use analyzer::Analyzer;
pub use config::Config;
pub use knowledge::KnowledgeBase;
pub use rules::{IncludeDiagnostic, Verdict};
pub use types::{LintResult, Outcome, Severity, Violation};
