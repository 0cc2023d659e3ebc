//! Lint for generated names that are already declared in the project.

use super::super::{Lint, LintTarget};
use crate::pipeline::Diagnostic;

/// Lint that warns when a generated top-level class would clash with a
/// declaration that already exists in the output package.
///
/// This usually means the classes were generated before; regenerating them
/// needs `--force`.
pub struct ExistingNameLint;

impl Lint for ExistingNameLint {
    fn name(&self) -> &'static str {
        "existing-name"
    }

    fn description(&self) -> &'static str {
        "Warn about generated class names that are already declared"
    }

    fn check(&self, target: &LintTarget<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let project = target.project;
        let package = project.package_of(target.naming.root);

        for &class in target.classes {
            // Nested classes usually stay nested inside their generated parent.
            if class != target.naming.root && project.class(class).parent.is_some() {
                continue;
            }
            let name = target.naming.class_name(project, class);
            let fq_name = if package.is_empty() {
                name
            } else {
                format!("{package}.{name}")
            };
            let Some(existing) = project.find(&fq_name) else {
                continue;
            };

            let path = &project.file(project.class(existing).file).path;
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("'{}' is already declared in {}", fq_name, path.display()),
                )
                .at(project.qualified_name(class)),
            );
        }
    }
}
