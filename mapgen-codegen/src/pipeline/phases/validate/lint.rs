//! Lint trait for checking the classes that will be generated.

use mapgen_ir::{ClassId, Project};

use crate::{generator::Naming, pipeline::Diagnostic};

/// What a lint looks at.
pub struct LintTarget<'a> {
    pub project: &'a Project,
    pub naming: &'a Naming,
    /// Supported classes reachable from the selected class, root first.
    pub classes: &'a [ClassId],
}

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A lint that checks the classes to generate for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the target and add any diagnostics.
    fn check(&self, target: &LintTarget<'_>, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
