use crate::context::FileCtx;
use crate::types::{Location, Severity, Violation};

pub const NAME: &str = "line-length";

pub const DEFAULT_MAX: usize = 140;

pub struct LineLength {
    pub max: usize,
    pub severity: Severity,
}

impl Default for LineLength {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            severity: Severity::Error,
        }
    }
}

impl LineLength {
    /// Length is counted in chars, not bytes.
    pub fn check(&self, ctx: &FileCtx<'_>) -> Vec<Violation> {
        ctx.content
            .lines()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > self.max)
            .map(|(idx, _)| {
                Violation::new(
                    NAME,
                    self.severity,
                    Location::new(ctx.relative_path.clone(), idx + 1),
                    format!("line exceeds {} chars", self.max),
                )
            })
            .collect()
    }
}
