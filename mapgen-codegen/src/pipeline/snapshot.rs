//! Pipeline snapshot plugin for visualization and debugging.
//!
//! This module provides a plugin that captures the pipeline state after each
//! phase, so the intermediate plan and workspace can be inspected.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::Result;
use serde::Serialize;

use super::{Diagnostic, GenerationContext, Plugin};
use crate::{
    generator::{GeneratedClasses, GenerationPlan, Naming},
    model::Workspace,
};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Generated names (available after "select").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naming: Option<Naming>,

    /// Output file allocation (available after "plan").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<GenerationPlan>,

    /// Generated classes (available after "entity").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<GeneratedClasses>,

    /// Staged output files.
    pub workspace: Workspace,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// Use this plugin with the `--visualize` flag to dump intermediate state
/// for debugging and understanding the pipeline.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".mapgen/debug"));
/// let ctx = pipeline.run(project, options)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Snapshots are written here as they are taken, when set.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes `<phase>.json` files to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        for snapshot in snapshots.iter() {
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &GenerationContext) {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            naming: ctx.naming.clone(),
            plan: ctx.plan.clone(),
            classes: ctx.classes.clone(),
            workspace: ctx.workspace.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        self.capture_snapshot(phase, ctx);

        if let Some(dir) = &self.output_dir {
            let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = snapshots.last() {
                fs::create_dir_all(dir)?;
                write_snapshot(dir, snapshot)?;
            }
        }

        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        pipeline::{GenerateOptions, Pipeline},
        testing::project,
    };

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_snapshots_written_per_phase() {
        let temp = TempDir::new().unwrap();
        let project = project(&[(
            "demo/Point.kt",
            "package demo\ndata class Point(val x: Int, val y: Int)",
        )]);

        Pipeline::new()
            .plugin(SnapshotPlugin::with_output_dir(temp.path()))
            .run(project, GenerateOptions::new("Point"))
            .unwrap();

        for phase in ["select", "validate", "plan", "entity", "mapper"] {
            assert!(temp.path().join(format!("{phase}.json")).is_file());
        }
        let mapper = fs::read_to_string(temp.path().join("mapper.json")).unwrap();
        assert!(mapper.contains("mapToModel"));
        let select = fs::read_to_string(temp.path().join("select.json")).unwrap();
        assert!(!select.contains("\"plan\""));
    }
}
