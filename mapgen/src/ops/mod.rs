//! Core operations.
//!
//! This module contains the business logic for mapgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod generate;
pub mod list;

pub use check::check;
pub use explain::explain;
pub use generate::generate;
pub use list::list;
use mapgen_codegen::pipeline::{Diagnostic, GenerationContext, Severity};

/// Diagnostic text with its location on a second line.
fn describe(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(location) => format!("{}\n  --> {}", diagnostic.message, location),
        None => diagnostic.message.clone(),
    }
}

fn messages(ctx: &GenerationContext, severity: Severity) -> Vec<String> {
    ctx.diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(describe)
        .collect()
}

/// Fully-qualified name of the selected class and of its counterpart.
fn selection(ctx: &GenerationContext) -> (String, String) {
    let source = ctx
        .naming
        .as_ref()
        .map(|naming| ctx.project.qualified_name(naming.root))
        .unwrap_or_else(|| ctx.options.class.clone());
    let generated = ctx
        .root
        .as_ref()
        .map(|root| root.qualified_name())
        .unwrap_or_default();
    (source, generated)
}
