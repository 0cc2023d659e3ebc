//! Select phase - resolves the class to generate from and the generated names.

use eyre::{Result, bail, eyre};
use mapgen_core::filter_identifier;
use mapgen_ir::{ClassId, Project};

use crate::{
    generator::Naming,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Reported when the selection is neither a data class nor an enum.
pub const UNSUPPORTED_SELECTION: &str = "mapgen only supports data classes and enums";

const PHASE: &str = "select";

/// Phase that resolves the selected class and fixes the generated names.
///
/// The class name and suffix go through the same identifier filter as user
/// input; if nothing usable is left, the run is aborted.
pub struct SelectPhase;

impl Phase for SelectPhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    fn description(&self) -> &'static str {
        "Resolve the selected class and the generated names"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let class = match find_class(&ctx.project, &ctx.options.class) {
            Ok(class) => class,
            Err(message) => {
                ctx.add_error(PHASE, message.clone());
                return Err(eyre!(message));
            }
        };

        let decl = ctx.project.class(class);
        if !decl.is_supported() {
            let location = ctx.project.qualified_name(class);
            ctx.add_diagnostic(Diagnostic::error(PHASE, UNSUPPORTED_SELECTION).at(location));
            bail!(UNSUPPORTED_SELECTION);
        }

        let root_name = filter_identifier(ctx.options.name.as_deref().unwrap_or(&decl.name));
        let suffix = filter_identifier(&ctx.options.suffix);
        for (what, value) in [("class name", &root_name), ("suffix", &suffix)] {
            if value.is_empty() {
                let message = format!("the {what} must contain letters, digits, '_' or '$'");
                ctx.add_error(PHASE, message.clone());
                bail!(message);
            }
        }

        ctx.naming = Some(Naming::new(class, root_name, suffix));
        Ok(())
    }
}

/// Look a class up by fully-qualified name, nested path (`Outer.Inner`) or
/// simple name.
fn find_class(project: &Project, name: &str) -> std::result::Result<ClassId, String> {
    let name = name.trim();
    if let Some(class) = project.find(name) {
        return Ok(class);
    }

    let mut candidates: Vec<ClassId> = project
        .classes()
        .iter()
        .filter(|c| project.nested_path(c.id) == name)
        .map(|c| c.id)
        .collect();
    if candidates.is_empty() {
        candidates = project.find_by_simple_name(name);
    }

    match candidates.as_slice() {
        [] => Err(format!("no class named `{name}` was found")),
        [class] => Ok(*class),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .map(|c| project.qualified_name(*c))
                .collect();
            Err(format!("`{name}` is ambiguous, use one of: {}", names.join(", ")))
        }
    }
}
