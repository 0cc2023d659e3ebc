//! Mapper phase - generates the conversion functions.

use eyre::{Result, eyre};

use crate::{
    analysis::ProjectResolver,
    generator::MapperGenerator,
    pipeline::{GenerationContext, Phase},
};

/// Phase that generates one `mapTo<Suffix>()` function per generated class.
pub struct MapperPhase;

impl Phase for MapperPhase {
    fn name(&self) -> &'static str {
        "mapper"
    }

    fn description(&self) -> &'static str {
        "Generate mapTo<Suffix>() conversion functions"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let naming = ctx
            .naming
            .as_ref()
            .ok_or_else(|| eyre!("naming not set - SelectPhase must run before MapperPhase"))?;
        let plan = ctx
            .plan
            .as_ref()
            .ok_or_else(|| eyre!("plan not set - PlanPhase must run before MapperPhase"))?;
        let classes = ctx.classes.as_ref().ok_or_else(|| {
            eyre!("generated classes not set - EntityPhase must run before MapperPhase")
        })?;
        let resolver = ProjectResolver::new(&ctx.project);

        let diagnostics =
            MapperGenerator::new(&resolver, plan, naming, classes, &mut ctx.workspace)
                .generate()?;

        ctx.diagnostics.extend(diagnostics);
        Ok(())
    }
}
