use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Two-valued outcome of a check, for a single file or a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Fail,
}

impl Outcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Where a violation was found. `file` is relative to the checked root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    #[must_use]
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
        }
    }
}

/// Renders as `<relative-path>: <message>`, one line per violation.
impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location.file.display(), self.message)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    pub violations: Vec<Violation>,
    pub files_checked: usize,
}

impl LintResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.has_errors() {
            Outcome::Fail
        } else {
            Outcome::Success
        }
    }

    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let mut errors = 0;
        let mut warnings = 0;
        let mut infos = 0;
        for v in &self.violations {
            match v.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => infos += 1,
            }
        }
        (errors, warnings, infos)
    }

    /// Violations go to stdout for CI scraping, the summary to stderr.
    pub fn print_report(&self) {
        let (errors, warnings, infos) = self.count_by_severity();

        for v in &self.violations {
            println!("{v}");
        }

        eprintln!(
            "\n{} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: Severity) -> Violation {
        Violation::new(
            "line-length",
            severity,
            Location::new(PathBuf::from("offbynull/utils.h"), 3),
            "line exceeds 140 chars",
        )
    }

    #[test]
    fn display_is_path_colon_message() {
        assert_eq!(
            violation(Severity::Error).to_string(),
            "offbynull/utils.h: line exceeds 140 chars"
        );
    }

    #[test]
    fn empty_result_succeeds() {
        let result = LintResult::new();
        assert!(!result.has_errors());
        assert_eq!(result.outcome(), Outcome::Success);
    }

    #[test]
    fn only_errors_fail_the_run() {
        let mut result = LintResult::new();
        result.violations.push(violation(Severity::Warning));
        result.violations.push(violation(Severity::Info));
        assert_eq!(result.outcome(), Outcome::Success);

        result.violations.push(violation(Severity::Error));
        assert_eq!(result.outcome(), Outcome::Fail);
        assert_eq!(result.count_by_severity(), (1, 1, 1));
    }
}
