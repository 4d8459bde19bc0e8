use crate::context::FileCtx;
use crate::types::{Location, Severity, Violation};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

pub const NAME: &str = "test-group";

static TEST_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TEST\((\w*?), (\w*?)\)").expect("valid TEST regex"));

pub struct TestGroup {
    pub severity: Severity,
}

impl Default for TestGroup {
    fn default() -> Self {
        Self {
            severity: Severity::Error,
        }
    }
}

impl TestGroup {
    pub fn check(&self, ctx: &FileCtx<'_>) -> Vec<Violation> {
        if !ctx.is_test {
            return Vec::new();
        }

        let expected = expected_group(&ctx.relative_path);
        let mut reported = HashSet::new();
        let mut violations = Vec::new();

        for (idx, line) in ctx.content.lines().enumerate() {
            for cap in TEST_MACRO.captures_iter(line) {
                let group = &cap[1];
                if group != expected && reported.insert(group.to_string()) {
                    violations.push(Violation::new(
                        NAME,
                        self.severity,
                        Location::new(ctx.relative_path.clone(), idx + 1),
                        format!("Bad or missing test group. Expected {expected}."),
                    ));
                }
            }
        }

        violations
    }
}

/// First letter of each directory, then the file stem, in PascalCase:
/// `offbynull/aligner/aligner_test.cpp` → `OAAlignerTest`.
#[must_use]
pub fn expected_group(relative_path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(parent) = relative_path.parent() {
        for component in parent.components() {
            if let std::path::Component::Normal(dir) = component {
                if let Some(initial) = sanitize(&dir.to_string_lossy()).chars().next() {
                    parts.push(initial.to_string());
                }
            }
        }
    }
    if let Some(stem) = relative_path.file_stem() {
        parts.push(sanitize(&stem.to_string_lossy()));
    }

    snake_to_pascal(&parts.join("_"))
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn snake_to_pascal(text: &str) -> String {
    text.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SourceKind;
    use std::path::PathBuf;

    fn check_test_file(relative: &str, content: &str) -> Vec<Violation> {
        let ctx = FileCtx {
            path: Path::new(relative),
            content,
            relative_path: PathBuf::from(relative),
            kind: SourceKind::Source,
            is_test: true,
        };
        TestGroup::default().check(&ctx)
    }

    #[test]
    fn group_from_path() {
        assert_eq!(
            expected_group(Path::new("offbynull/aligner/aligner_test.cpp")),
            "OAAlignerTest"
        );
        assert_eq!(
            expected_group(Path::new("offbynull/aligner/backtrackers/graph_backtracker_test.cpp")),
            "OABGraphBacktrackerTest"
        );
        assert_eq!(expected_group(Path::new("concat_view_test.cpp")), "ConcatViewTest");
    }

    #[test]
    fn pascal_case_lowercases_the_rest() {
        assert_eq!(snake_to_pascal("o_h_BLOSUM_test"), "OHBlosumTest");
        assert_eq!(snake_to_pascal("a__b"), "AB");
    }

    #[test]
    fn matching_groups_pass() {
        let content = "TEST(OHConcatViewTest, Forward) {}\nTEST(OHConcatViewTest, Reverse) {}\n";
        assert!(check_test_file("offbynull/helpers/concat_view_test.cpp", content).is_empty());
    }

    #[test]
    fn each_wrong_group_reported_once() {
        let content = "TEST(ConcatViewTest, A) {}\nTEST(ConcatViewTest, B) {}\nTEST(Other, C) {}\n";
        let v = check_test_file("offbynull/helpers/concat_view_test.cpp", content);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].message, "Bad or missing test group. Expected OHConcatViewTest.");
        assert_eq!(v[0].location.line, 1);
        assert_eq!(v[1].location.line, 3);
    }

    #[test]
    fn non_test_files_are_skipped() {
        let ctx = FileCtx {
            path: Path::new("offbynull/helpers/concat_view.h"),
            content: "TEST(Wrong, A) {}",
            relative_path: PathBuf::from("offbynull/helpers/concat_view.h"),
            kind: SourceKind::Header,
            is_test: false,
        };
        assert!(TestGroup::default().check(&ctx).is_empty());
    }
}
