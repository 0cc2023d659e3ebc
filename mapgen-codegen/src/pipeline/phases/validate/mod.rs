//! Validate phase - runs lints over the classes that will be generated.

mod lint;
pub mod lints;

use eyre::{Result, bail, eyre};
pub use lint::{Lint, LintInfo, LintTarget};
pub use lints::{DefaultValuesLint, ExistingNameLint, PrivateFieldsLint};

use crate::{
    analysis::{ProjectResolver, reachable_classes},
    pipeline::{GenerationContext, Phase},
};

/// Phase that checks the reachable classes using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(ExistingNameLint),
                Box::new(PrivateFieldsLint),
                Box::new(DefaultValuesLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Lint the classes reachable from the selection"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let naming = ctx
            .naming
            .as_ref()
            .ok_or_else(|| eyre!("naming not set - SelectPhase must run before ValidatePhase"))?;
        let classes = reachable_classes(&ProjectResolver::new(&ctx.project), naming.root);
        let target = LintTarget {
            project: &ctx.project,
            naming,
            classes: &classes,
        };

        for lint in &self.lints {
            lint.check(&target, &mut ctx.diagnostics);
        }

        // Warnings and infos don't stop generation
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
