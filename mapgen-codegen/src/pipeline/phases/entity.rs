//! Entity phase - generates the data classes and enums.

use eyre::{Result, eyre};

use crate::{
    analysis::ProjectResolver,
    generator::EntityGenerator,
    pipeline::{GenerationContext, Phase},
};

/// Phase that generates the counterpart of every reachable class.
pub struct EntityPhase;

impl Phase for EntityPhase {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn description(&self) -> &'static str {
        "Generate data classes and enums"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let naming = ctx
            .naming
            .as_ref()
            .ok_or_else(|| eyre!("naming not set - SelectPhase must run before EntityPhase"))?;
        let plan = ctx
            .plan
            .as_ref()
            .ok_or_else(|| eyre!("plan not set - PlanPhase must run before EntityPhase"))?;
        let resolver = ProjectResolver::new(&ctx.project);

        let output = EntityGenerator::new(&resolver, plan, naming, &mut ctx.workspace).generate()?;

        ctx.diagnostics.extend(output.diagnostics);
        ctx.root = Some(output.root);
        ctx.classes = Some(output.classes);
        Ok(())
    }
}
