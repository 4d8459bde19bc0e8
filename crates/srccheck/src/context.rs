use std::path::{Path, PathBuf};

/// Whether a file is a header or a compiled source, as decided by the
/// configured extension lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Header,
    Source,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Source => write!(f, "source"),
        }
    }
}

/// Per-file context handed to every rule.
#[derive(Debug, Clone)]
pub struct FileCtx<'a> {
    pub path: &'a Path,
    pub content: &'a str,
    pub relative_path: PathBuf,
    pub kind: SourceKind,
    pub is_test: bool,
}

impl<'a> FileCtx<'a> {
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path, kind: SourceKind) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let is_test = detect_test_file(path);

        Self {
            path,
            content,
            relative_path,
            kind,
            is_test,
        }
    }

    /// Non-empty path components of the relative path, file name included.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        self.relative_path
            .components()
            .filter_map(|c| {
                if let std::path::Component::Normal(s) = c {
                    Some(s.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect()
    }
}

/// gtest sources are named `*_test.cpp`.
fn detect_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with("_test.cpp"))
}
