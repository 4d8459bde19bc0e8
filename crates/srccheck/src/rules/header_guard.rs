use crate::context::{FileCtx, SourceKind};
use crate::types::{Location, Severity, Violation};

pub const NAME: &str = "header-guard";

pub struct HeaderGuard {
    pub severity: Severity,
}

impl Default for HeaderGuard {
    fn default() -> Self {
        Self {
            severity: Severity::Error,
        }
    }
}

impl HeaderGuard {
    pub fn check(&self, ctx: &FileCtx<'_>) -> Vec<Violation> {
        if ctx.kind != SourceKind::Header {
            return Vec::new();
        }

        let guard = expected_guard(&ctx.components());
        if has_guard(ctx.content, &guard) {
            return Vec::new();
        }

        vec![Violation::new(
            NAME,
            self.severity,
            Location::new(ctx.relative_path.clone(), 1),
            format!("Bad or missing guard. Expected {guard}."),
        )]
    }
}

/// `offbynull/aligner/graph.h` → `OFFBYNULL_ALIGNER_GRAPH_H`.
#[must_use]
pub fn expected_guard(components: &[String]) -> String {
    components
        .iter()
        .map(|part| {
            part.to_uppercase()
                .chars()
                .map(|c| if c.is_ascii_uppercase() || c.is_ascii_digit() { c } else { '_' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_")
}

fn has_guard(content: &str, guard: &str) -> bool {
    let lines: Vec<&str> = content.trim().lines().filter(|l| !l.is_empty()).collect();
    let (Some(first), Some(second), Some(last)) = (lines.first(), lines.get(1), lines.last()) else {
        return false;
    };
    *first == format!("#ifndef {guard}")
        && *second == format!("#define {guard}")
        && *last == format!("#endif //{guard}")
}
