//! Pipeline orchestrator.

use eyre::Result;
use mapgen_ir::Project;
use tracing::debug;

use super::{
    GenerateOptions, GenerationContext, Phase, PhaseInfo, Plugin,
    phases::{EntityPhase, MapperPhase, PlanPhase, SelectPhase, ValidatePhase},
};

/// The generation pipeline orchestrator.
///
/// The pipeline runs the built-in phases (select, validate, plan, entity,
/// mapper) followed by any user phases, calling plugin hooks before and
/// after each phase. Everything happens in memory; rendering and writing
/// the staged workspace is left to the caller.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".mapgen/debug"))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(project, GenerateOptions::new("User"))?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with only the built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Information about every phase, in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Run the pipeline over a parsed project.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally; the workspace is then
    /// incomplete and must not be written.
    pub fn run(&self, project: Project, options: GenerateOptions) -> Result<GenerationContext> {
        let mut ctx = GenerationContext::new(project, options);

        for phase in builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut GenerationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        debug!(phase = phase_name, "running phase");
        phase.run(ctx)?;
        debug!(
            phase = phase_name,
            diagnostics = ctx.diagnostics.len(),
            "phase finished"
        );

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(SelectPhase),
        Box::new(ValidatePhase::new()),
        Box::new(PlanPhase),
        Box::new(EntityPhase),
        Box::new(MapperPhase),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::testing::project;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut GenerationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut GenerationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn make_project() -> Project {
        project(&[(
            "demo/User.kt",
            r#"
package demo
data class User(val name: String, val address: Address)
data class Address(val city: String)
interface Service
"#,
        )])
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .run(make_project(), GenerateOptions::new("User").suffix("Dto"))
            .expect("pipeline should succeed");

        assert!(ctx.naming.is_some());
        assert!(ctx.plan.is_some());
        assert_eq!(ctx.classes.as_ref().map(|c| c.len()), Some(2));
        assert_eq!(ctx.root.as_ref().map(|r| r.qualified_name()).as_deref(), Some("UserDto"));
        assert_eq!(ctx.workspace.files()[0].functions.len(), 2);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(make_project(), GenerateOptions::new("demo.User"))
            .expect("pipeline should succeed");

        // 5 built-in phases = 5 before + 5 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 5);
        assert_eq!(after_count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_unsupported_selection_stops_before_planning() {
        let (plugin, before_count, _) = CountingPlugin::new();

        let err = Pipeline::new()
            .plugin(plugin)
            .run(make_project(), GenerateOptions::new("Service"))
            .unwrap_err();

        assert_eq!(err.to_string(), "mapgen only supports data classes and enums");
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_phase_info_order() {
        let names: Vec<&str> = Pipeline::new().phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["select", "validate", "plan", "entity", "mapper"]);
    }
}
