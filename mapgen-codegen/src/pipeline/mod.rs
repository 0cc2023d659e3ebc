//! Generation pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that runs the generation
//! phases over a parsed project. The pipeline provides:
//!
//! - Explicit phase boundaries (select → validate → plan → entity → mapper)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared state via [`GenerationContext`]
//!
//! # Example
//!
//! ```ignore
//! use mapgen_codegen::pipeline::{GenerateOptions, Pipeline};
//!
//! let options = GenerateOptions::new("com.example.User").suffix("Dto");
//! let ctx = Pipeline::new().run(project, options)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//!
//! // Render the staged files
//! let files = Generator::new(&ctx.workspace).preview();
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{DEFAULT_SUFFIX, GenerateOptions, GenerationContext};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
