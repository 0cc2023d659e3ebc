//! Lint for constructor properties that are left out of the generated class.

use super::super::{Lint, LintTarget};
use crate::pipeline::Diagnostic;

/// Lint that reports private constructor properties.
///
/// Private properties cannot be read by an extension function, so they get
/// no counterpart in the generated class.
pub struct PrivateFieldsLint;

impl Lint for PrivateFieldsLint {
    fn name(&self) -> &'static str {
        "private-fields"
    }

    fn description(&self) -> &'static str {
        "Report private constructor properties that are not mapped"
    }

    fn check(&self, target: &LintTarget<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for &class in target.classes {
            let owner = target.project.qualified_name(class);
            for field in target.project.class(class).fields.iter() {
                if !field.is_private() {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::info(
                        "validate",
                        format!(
                            "private property '{}' of '{}' is not mapped",
                            field.name, owner
                        ),
                    )
                    .at(format!("{}.{}", owner, field.name)),
                );
            }
        }
    }
}
