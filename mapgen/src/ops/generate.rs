//! Generate operation - render and write the generated Kotlin files.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use mapgen_codegen::pipeline::{GenerateOptions, Pipeline, Severity, SnapshotPlugin};
use mapgen_codegen_kotlin::{Generator, LanguageCodegen};
use mapgen_ir::Project;
use tracing::info;

use super::{messages, selection};
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct RunOptions<'a> {
    /// Directory the generated paths are relative to.
    pub base: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Where to write pipeline snapshots, if anywhere.
    pub visualize: Option<PathBuf>,
}

/// Execute the generate operation.
///
/// Runs the pipeline over the project and writes every generated file, or
/// none of them.
pub fn generate(
    project: Project,
    options: GenerateOptions,
    run: RunOptions<'_>,
) -> Result<GenerateReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = &run.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let overwrite = options.overwrite;
    let ctx = pipeline.run(project, options).wrap_err("Generation failed")?;
    let warnings = messages(&ctx, Severity::Warning);
    let (source, generated) = selection(&ctx);

    let generator = Generator::new(&ctx.workspace).overwrite(overwrite);
    let result = if run.dry_run {
        let files = generator
            .preview()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path.display().to_string(),
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let written = generator
            .generate(run.base)
            .wrap_err("Failed to write generated files")?;
        info!(files = written.total(), "generation finished");

        GenerationResult::Written(WrittenResult {
            created: written.created,
            replaced: written.replaced,
            snapshot_dir: run.visualize,
        })
    };

    Ok(GenerateReport {
        source,
        generated,
        warnings,
        result,
    })
}
