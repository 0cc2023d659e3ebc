//! Explain operation - pipeline explanation.

use eyre::{Context, Result};
use mapgen_codegen::pipeline::{GenerateOptions, Pipeline, phases::ValidatePhase};
use mapgen_ir::Project;

use crate::reports::{ExplainReport, LintInfo, PhaseInfo, SelectionInfo};

/// Execute the explain operation.
///
/// Describes the pipeline and, when a class is given, what a run for it
/// would generate.
pub fn explain(selection: Option<(Project, GenerateOptions)>) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();

    let phases = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let lints = ValidatePhase::new()
        .lint_info()
        .into_iter()
        .map(|l| LintInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let selection = match selection {
        Some((project, options)) => {
            let mapper = options.mapper.to_string();
            let ctx = pipeline.run(project, options).wrap_err("Pipeline failed")?;
            let (class, root) = super::selection(&ctx);

            let classes = ctx
                .classes
                .iter()
                .flat_map(|classes| classes.iter())
                .map(|(id, materialized)| {
                    let source = ctx.project.qualified_name(id);
                    match materialized.generated() {
                        Some(target) => format!("{} -> {}", source, target.qualified_name()),
                        None => format!("{} (skipped, name taken)", source),
                    }
                })
                .collect();
            let files = ctx
                .workspace
                .files()
                .iter()
                .filter(|file| !file.is_empty())
                .map(|file| file.path.display().to_string())
                .collect();
            let function = ctx
                .naming
                .as_ref()
                .map(|naming| naming.function_name())
                .unwrap_or_default();

            Some(SelectionInfo {
                class,
                root,
                function,
                mapper,
                classes,
                files,
            })
        }
        None => None,
    };

    Ok(ExplainReport {
        phases,
        lints,
        selection,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ops::testing::{USER, project};

    #[test]
    fn test_explain_pipeline() {
        let report = explain(None).unwrap();

        let phases: Vec<&str> = report.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(phases, vec!["select", "validate", "plan", "entity", "mapper"]);
        assert_eq!(report.lints.len(), 3);
        assert!(report.selection.is_none());
    }

    #[test]
    fn test_explain_selection() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), &[("demo/User.kt", USER)]);

        let report = explain(Some((project, GenerateOptions::new("User").suffix("Dto")))).unwrap();
        let selection = report.selection.unwrap();

        assert_eq!(selection.class, "demo.User");
        assert_eq!(selection.root, "UserDto");
        assert_eq!(selection.function, "mapToDto");
        assert_eq!(selection.mapper, "inline");
        assert_eq!(
            selection.classes,
            vec!["demo.User -> UserDto", "demo.Address -> AddressDto"]
        );
        assert_eq!(selection.files.len(), 1);
    }
}
