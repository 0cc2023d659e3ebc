//! Generation context passed through pipeline phases.

use eyre::{Result, eyre};
use mapgen_ir::Project;
use mapgen_source::MapperPlacement;
use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    generator::{GeneratedClasses, GenerationPlan, Naming},
    model::{GeneratedRef, Workspace},
};

/// Suffix used when neither the command line nor the config names one.
pub const DEFAULT_SUFFIX: &str = "Model";

/// What to generate.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Simple, nested (`Outer.Inner`) or fully-qualified class name.
    pub class: String,
    /// Base name of the root's counterpart; defaults to the class name.
    pub name: Option<String>,
    pub suffix: String,
    pub mapper: MapperPlacement,
    /// Replace output files that already exist.
    pub overwrite: bool,
}

impl GenerateOptions {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            mapper: MapperPlacement::Inline,
            overwrite: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn mapper(mut self, mapper: MapperPlacement) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Context passed through all pipeline phases.
///
/// This struct carries the state of generation through each phase,
/// accumulating results and diagnostics along the way.
#[derive(Debug)]
pub struct GenerationContext {
    pub project: Project,
    pub options: GenerateOptions,
    /// Generated names (populated by SelectPhase).
    pub naming: Option<Naming>,
    /// Output file allocation (populated by PlanPhase).
    pub plan: Option<GenerationPlan>,
    /// Generated classes by source class (populated by EntityPhase).
    pub classes: Option<GeneratedClasses>,
    /// Counterpart of the selected class (populated by EntityPhase).
    pub root: Option<GeneratedRef>,
    /// Staged output files.
    pub workspace: Workspace,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new(project: Project, options: GenerateOptions) -> Self {
        Self {
            project,
            options,
            naming: None,
            plan: None,
            classes: None,
            root: None,
            workspace: Workspace::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Generated names; fails if SelectPhase has not run.
    pub fn naming(&self) -> Result<&Naming> {
        self.naming
            .as_ref()
            .ok_or_else(|| eyre!("naming not set - did SelectPhase run?"))
    }

    /// Output plan; fails if PlanPhase has not run.
    pub fn plan(&self) -> Result<&GenerationPlan> {
        self.plan
            .as_ref()
            .ok_or_else(|| eyre!("plan not set - did PlanPhase run?"))
    }

    /// Generated classes; fails if EntityPhase has not run.
    pub fn classes(&self) -> Result<&GeneratedClasses> {
        self.classes
            .as_ref()
            .ok_or_else(|| eyre!("generated classes not set - did EntityPhase run?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> GenerationContext {
        GenerationContext::new(Project::new(), GenerateOptions::new("User"))
    }

    #[test]
    fn test_context_creation() {
        let ctx = make_context();

        assert!(ctx.naming.is_none());
        assert!(ctx.plan.is_none());
        assert!(ctx.diagnostics.is_empty());
        assert_eq!(ctx.options.suffix, DEFAULT_SUFFIX);
        assert!(ctx.naming().is_err());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = make_context();

        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");
        ctx.add_info("test", "just info");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_options_builder() {
        let options = GenerateOptions::new("a.User")
            .name("Account")
            .suffix("Dto")
            .mapper(MapperPlacement::Separate)
            .overwrite(true);

        assert_eq!(options.name.as_deref(), Some("Account"));
        assert_eq!(options.suffix, "Dto");
        assert_eq!(options.mapper, MapperPlacement::Separate);
        assert!(options.overwrite);
    }
}
