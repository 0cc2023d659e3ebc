//! Plan phase - allocates the output files.

use eyre::{Result, eyre};
use tracing::info;

use crate::{
    analysis::ProjectResolver,
    generator::Planner,
    pipeline::{GenerationContext, Phase},
};

/// Phase that creates one output file per origin file of a reachable class.
pub struct PlanPhase;

impl Phase for PlanPhase {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn description(&self) -> &'static str {
        "Allocate one output file per origin file"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let naming = ctx
            .naming
            .as_ref()
            .ok_or_else(|| eyre!("naming not set - SelectPhase must run before PlanPhase"))?;
        let resolver = ProjectResolver::new(&ctx.project);

        let plan = Planner::new(&resolver, naming)
            .placement(ctx.options.mapper)
            .overwrite(ctx.options.overwrite)
            .plan(&mut ctx.workspace)?;

        info!(files = ctx.workspace.files().len(), "planned output files");
        ctx.plan = Some(plan);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mapgen_source::MapperPlacement;

    use super::*;
    use crate::{generator::Naming, pipeline::GenerateOptions, testing::project};

    fn make_context(options: GenerateOptions) -> GenerationContext {
        let project = project(&[
            (
                "demo/User.kt",
                "package demo\nimport demo.geo.Address\ndata class User(val address: Address)",
            ),
            (
                "demo/geo/Address.kt",
                "package demo.geo\ndata class Address(val city: String)",
            ),
        ]);
        let root = project.find("demo.User").unwrap();
        let mut ctx = GenerationContext::new(project, options);
        ctx.naming = Some(Naming::new(root, "User", "Dto"));
        ctx
    }

    #[test]
    fn test_plan_inline() {
        let mut ctx = make_context(GenerateOptions::new("User"));
        PlanPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.plan().unwrap().len(), 2);
        let paths: Vec<_> = ctx.workspace.files().iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                std::path::PathBuf::from("demo/UserDto.kt"),
                std::path::PathBuf::from("demo/AddressDto.kt"),
            ]
        );
        assert!(ctx.workspace.files().iter().all(|f| f.package == "demo"));
    }

    #[test]
    fn test_plan_separate() {
        let mut ctx = make_context(GenerateOptions::new("User").mapper(MapperPlacement::Separate));
        PlanPhase.run(&mut ctx).unwrap();
        assert_eq!(ctx.workspace.files().len(), 4);
    }

    #[test]
    fn test_requires_naming() {
        let mut ctx = make_context(GenerateOptions::new("User"));
        ctx.naming = None;
        let err = PlanPhase.run(&mut ctx).unwrap_err();
        assert!(err.to_string().contains("SelectPhase"));
    }
}
