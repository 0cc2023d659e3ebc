//! Check operation - plan a generation without writing.

use eyre::{Context, Result};
use mapgen_codegen::pipeline::{GenerateOptions, Pipeline, Severity};
use mapgen_ir::Project;

use super::{messages, selection};
use crate::reports::{CheckReport, PlannedFile};

/// Execute the check operation.
///
/// Runs the whole pipeline in memory and reports the diagnostics and the
/// files a generation would write.
pub fn check(project: Project, options: GenerateOptions) -> Result<CheckReport> {
    let ctx = Pipeline::new()
        .run(project, options)
        .wrap_err("Check failed")?;

    let files = ctx
        .workspace
        .files()
        .iter()
        .filter(|file| !file.is_empty())
        .map(|file| PlannedFile {
            path: file.path.display().to_string(),
            declarations: file.declarations.iter().map(|d| d.name.clone()).collect(),
            functions: file.functions.len(),
            exists: file.path.exists(),
        })
        .collect();

    Ok(CheckReport {
        source: selection(&ctx).0,
        errors: messages(&ctx, Severity::Error),
        warnings: messages(&ctx, Severity::Warning),
        infos: messages(&ctx, Severity::Info),
        files,
    })
}
