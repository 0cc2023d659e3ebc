//! Lint for default values that the generated class does not carry over.

use super::super::{Lint, LintTarget};
use crate::pipeline::Diagnostic;

/// Lint that reports mapped properties with a default value.
///
/// Generated classes declare every property without a default; the mapper
/// always passes the value explicitly.
pub struct DefaultValuesLint;

impl Lint for DefaultValuesLint {
    fn name(&self) -> &'static str {
        "default-values"
    }

    fn description(&self) -> &'static str {
        "Report default values that are not copied to generated classes"
    }

    fn check(&self, target: &LintTarget<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for &class in target.classes {
            let decl = target.project.class(class);
            let defaults: Vec<&str> = decl
                .visible_fields()
                .filter(|f| f.has_default)
                .map(|f| f.name.as_str())
                .collect();
            if defaults.is_empty() {
                continue;
            }

            let owner = target.project.qualified_name(class);
            diagnostics.push(
                Diagnostic::info(
                    "validate",
                    format!(
                        "default values of '{}' are not copied to '{}': {}",
                        owner,
                        target.naming.class_name(target.project, class),
                        defaults.join(", ")
                    ),
                )
                .at(owner),
            );
        }
    }
}
