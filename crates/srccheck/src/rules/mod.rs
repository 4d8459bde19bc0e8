pub mod header_guard;
pub mod line_length;
pub mod system_includes;
pub mod test_group;

pub use header_guard::HeaderGuard;
pub use line_length::LineLength;
pub use system_includes::{IncludeDiagnostic, SystemIncludes, Verdict};
pub use test_group::TestGroup;

/// All rules: (name, description)
pub const ALL_RULES: &[(&str, &str)] = &[
    (
        system_includes::NAME,
        "#include <...> set must equal the headers required by std::/boost:: usages",
    ),
    (
        header_guard::NAME,
        "headers must be guarded by #ifndef/#define/#endif derived from their path",
    ),
    (
        test_group::NAME,
        "TEST(Group, Name) in *_test.cpp must use the group derived from the path",
    ),
    (line_length::NAME, "lines must not exceed the configured length"),
];
