//! Built-in lints for the classes that will be generated.

mod default_values;
mod existing_name;
mod private_fields;

pub use default_values::DefaultValuesLint;
pub use existing_name::ExistingNameLint;
pub use private_fields::PrivateFieldsLint;

/// Run one lint over the classes reachable from `root`.
#[cfg(test)]
fn run_lint(
    lint: &dyn super::Lint,
    files: &[(&str, &str)],
    root: &str,
) -> Vec<crate::pipeline::Diagnostic> {
    use crate::{
        analysis::{ProjectResolver, reachable_classes},
        generator::Naming,
        testing::project,
    };

    let project = project(files);
    let root = project.find(root).expect("root class");
    let naming = Naming::new(root, project.class(root).name.clone(), "Model");
    let classes = reachable_classes(&ProjectResolver::new(&project), root);
    let target = super::LintTarget {
        project: &project,
        naming: &naming,
        classes: &classes,
    };

    let mut diagnostics = Vec::new();
    lint.check(&target, &mut diagnostics);
    diagnostics
}
