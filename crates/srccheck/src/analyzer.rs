use crate::config::Config;
use crate::context::{FileCtx, SourceKind};
use crate::knowledge::KnowledgeBase;
use crate::rules;
use crate::types::{LintResult, Severity, Violation};

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("root {0} is not a directory")]
    RootNotFound(PathBuf),
}

/// Rule instances configured for one run, shared by every file check.
struct RuleSet<'kb> {
    header_guard: rules::HeaderGuard,
    test_group: rules::TestGroup,
    system_includes: rules::SystemIncludes<'kb>,
    line_length: rules::LineLength,
}

pub struct Analyzer {
    root: PathBuf,
    config: Config,
    knowledge: KnowledgeBase,
    exclude_patterns: Vec<String>,
    rule_filter: Option<String>,
}

impl Analyzer {
    #[must_use]
    pub fn new(root: PathBuf, config: Config) -> Self {
        let mut exclude_patterns = config.analyzer.exclude.clone();
        if exclude_patterns.is_empty() {
            exclude_patterns.push("**/build/**".to_string());
        }
        Self {
            root,
            config,
            knowledge: KnowledgeBase::builtin(),
            exclude_patterns,
            rule_filter: None,
        }
    }

    #[must_use]
    pub fn with_rule_filter(mut self, filter: Option<&str>) -> Self {
        self.rule_filter = filter.map(String::from);
        self
    }

    /// Checks every matching file under the configured source directories.
    ///
    /// Violations never abort the run; an unreadable file does.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        if let Some(ref filter) = self.rule_filter {
            if !rules::ALL_RULES.iter().any(|(name, _)| name == filter) {
                return Err(AnalyzerError::UnknownRule(filter.clone()));
            }
        }

        if !self.root.is_dir() {
            return Err(AnalyzerError::RootNotFound(self.root.clone()));
        }

        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let rule_set = self.build_rule_set();

        let per_file = files
            .par_iter()
            .map(|(path, kind)| self.analyze_file(path, *kind, &rule_set))
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = LintResult::new();
        result.files_checked = files.len();
        result.violations = per_file.into_iter().flatten().collect();

        // Stable: keeps each file's violations in rule order.
        result
            .violations
            .sort_by(|a, b| a.location.file.cmp(&b.location.file));

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    fn build_rule_set(&self) -> RuleSet<'_> {
        let severity = |name: &str| self.config.rule_severity(name).unwrap_or(Severity::Error);

        RuleSet {
            header_guard: rules::HeaderGuard {
                severity: severity(rules::header_guard::NAME),
            },
            test_group: rules::TestGroup {
                severity: severity(rules::test_group::NAME),
            },
            system_includes: rules::SystemIncludes {
                knowledge: &self.knowledge,
                severity: severity(rules::system_includes::NAME),
            },
            line_length: rules::LineLength {
                max: self
                    .config
                    .rules
                    .get(rules::line_length::NAME)
                    .map_or(rules::line_length::DEFAULT_MAX, |c| {
                        c.get_usize("max", rules::line_length::DEFAULT_MAX)
                    }),
                severity: severity(rules::line_length::NAME),
            },
        }
    }

    fn analyze_file(
        &self,
        path: &Path,
        kind: SourceKind,
        rule_set: &RuleSet<'_>,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing {}: {}", kind, path.display());

        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let ctx = FileCtx::new(path, &content, &self.root, kind);
        let mut violations = Vec::new();

        if self.should_run_rule(rules::header_guard::NAME) {
            violations.extend(rule_set.header_guard.check(&ctx));
        }
        if self.should_run_rule(rules::test_group::NAME) {
            violations.extend(rule_set.test_group.check(&ctx));
        }
        if self.should_run_rule(rules::system_includes::NAME) {
            violations.extend(rule_set.system_includes.check(&ctx));
        }
        if self.should_run_rule(rules::line_length::NAME) {
            violations.extend(rule_set.line_length.check(&ctx));
        }

        Ok(violations)
    }

    /// Matching files sorted by path, each with its kind.
    fn discover_files(&self) -> Result<Vec<(PathBuf, SourceKind)>, AnalyzerError> {
        let analyzer_config = &self.config.analyzer;
        let mut files = BTreeMap::new();

        for source in &analyzer_config.sources {
            let dir = if source == Path::new(".") {
                self.root.clone()
            } else {
                self.root.join(source)
            };
            if !dir.is_dir() {
                warn!("Source directory {} does not exist, skipping", dir.display());
                continue;
            }

            let extensions = analyzer_config
                .header_extensions
                .iter()
                .map(|ext| (ext, SourceKind::Header))
                .chain(
                    analyzer_config
                        .source_extensions
                        .iter()
                        .map(|ext| (ext, SourceKind::Source)),
                );

            for (ext, kind) in extensions {
                let pattern = format!(
                    "{}/**/*.{}",
                    glob::Pattern::escape(&dir.to_string_lossy()),
                    ext
                );
                for entry in glob::glob(&pattern)? {
                    let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;
                    if path.is_file() && !self.should_exclude(&path) {
                        files.entry(path).or_insert(kind);
                    }
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Patterns match the path relative to the root, so directories above
    /// the root never exclude anything.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        self.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|glob_pattern| glob_pattern.matches(&path_str))
        })
    }

    fn should_run_rule(&self, rule_name: &str) -> bool {
        if let Some(ref filter) = self.rule_filter {
            if filter != rule_name {
                return false;
            }
        }
        self.config.is_rule_enabled(rule_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("has parent")).expect("create dirs");
        fs::write(path, content).expect("write file");
    }

    fn messages(result: &LintResult) -> Vec<String> {
        result.violations.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exclude_build_dir() {
        let analyzer = Analyzer::new(PathBuf::from("/repo"), Config::default());
        assert!(analyzer.should_exclude(Path::new("/repo/build/gen/config.h")));
        assert!(analyzer.should_exclude(Path::new("/repo/offbynull/build/gen.h")));
        assert!(!analyzer.should_exclude(Path::new("/repo/offbynull/utils.h")));
        assert!(!analyzer.should_exclude(Path::new("/repo/offbynull/build_helpers.h")));
    }

    #[test]
    fn exclude_ignores_directories_above_root() {
        let analyzer = Analyzer::new(PathBuf::from("/ci/build/repo"), Config::default());
        assert!(!analyzer.should_exclude(Path::new("/ci/build/repo/a.cpp")));
        assert!(analyzer.should_exclude(Path::new("/ci/build/repo/build/a.cpp")));
    }

    #[test]
    fn root_nested_under_build_is_still_checked() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().join("build").join("proj");
        write(&root, "a.cpp", "#include <string>\n");

        let result = Analyzer::new(root, Config::default())
            .analyze()
            .expect("analyze");
        assert_eq!(result.files_checked, 1);
        assert_eq!(messages(&result), vec!["a.cpp: string included but not required"]);
        assert!(!result.outcome().is_success());
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = Analyzer::new(tmp.path().join("typo"), Config::default()).analyze();
        assert!(matches!(err, Err(AnalyzerError::RootNotFound(_))));
    }

    #[test]
    fn clean_tree_succeeds() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(
            tmp.path(),
            "offbynull/utils.h",
            "#ifndef OFFBYNULL_UTILS_H\n#define OFFBYNULL_UTILS_H\n\n#include <vector>\n\nstd::vector<int> v();\n\n#endif //OFFBYNULL_UTILS_H\n",
        );
        write(tmp.path(), "main.cpp", "int main() { return 0; }\n");

        let result = Analyzer::new(tmp.path().to_path_buf(), Config::default())
            .analyze()
            .expect("analyze");
        assert_eq!(result.files_checked, 2);
        assert!(result.violations.is_empty(), "{:?}", messages(&result));
        assert!(result.outcome().is_success());
    }

    #[test]
    fn violations_are_relative_and_grouped_by_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "b.cpp", "#include <string>\n");
        write(tmp.path(), "a.cpp", "std::optional<int> x;\n#include <map>\n");

        let result = Analyzer::new(tmp.path().to_path_buf(), Config::default())
            .analyze()
            .expect("analyze");
        assert_eq!(
            messages(&result),
            vec![
                "a.cpp: std::optional requires include optional",
                "a.cpp: map included but not required",
                "b.cpp: string included but not required",
            ]
        );
        assert!(result.has_errors());
    }

    #[test]
    fn rule_filter_limits_rules() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "x.h", &format!("#include <map>\n{}\n", "y".repeat(200)));

        let result = Analyzer::new(tmp.path().to_path_buf(), Config::default())
            .with_rule_filter(Some(rules::line_length::NAME))
            .analyze()
            .expect("analyze");
        assert_eq!(messages(&result), vec!["x.h: line exceeds 140 chars"]);
    }

    #[test]
    fn unknown_rule_filter_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = Analyzer::new(tmp.path().to_path_buf(), Config::default())
            .with_rule_filter(Some("no-such-rule"))
            .analyze();
        assert!(matches!(err, Err(AnalyzerError::UnknownRule(_))));
    }

    #[test]
    fn config_disables_and_downgrades_rules() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "x.h", "#include <map>\n");

        let config = Config::parse(
            "[rules.header-guard]\nenabled = false\n\n[rules.system-includes]\nseverity = \"warning\"\n",
        )
        .expect("config");
        let result = Analyzer::new(tmp.path().to_path_buf(), config)
            .analyze()
            .expect("analyze");
        assert_eq!(messages(&result), vec!["x.h: map included but not required"]);
        assert_eq!(result.violations[0].severity, Severity::Warning);
        assert!(result.outcome().is_success());
    }

    #[test]
    fn only_configured_sources_and_extensions_are_scanned() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "offbynull/a.cpp", "#include <map>\n");
        write(tmp.path(), "offbynull/notes.txt", "#include <map>\n");
        write(tmp.path(), "third_party/b.cpp", "#include <map>\n");

        let config = Config::parse("[analyzer]\nsources = [\"offbynull\"]\n").expect("config");
        let result = Analyzer::new(tmp.path().to_path_buf(), config)
            .analyze()
            .expect("analyze");
        assert_eq!(result.files_checked, 1);
        assert_eq!(messages(&result), vec!["offbynull/a.cpp: map included but not required"]);
    }

    #[test]
    fn missing_source_dir_is_skipped() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = Config::parse("[analyzer]\nsources = [\"nope\"]\n").expect("config");
        let result = Analyzer::new(tmp.path().to_path_buf(), config)
            .analyze()
            .expect("analyze");
        assert_eq!(result.files_checked, 0);
        assert!(result.outcome().is_success());
    }

    #[test]
    fn unreadable_file_aborts_the_run() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("bad.cpp"), [0xff, 0xfe, 0x00]).expect("write");

        let err = Analyzer::new(tmp.path().to_path_buf(), Config::default()).analyze();
        assert!(matches!(err, Err(AnalyzerError::Read { .. })));
    }
}
