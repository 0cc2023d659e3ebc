//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`SelectPhase`] - resolves the selected class and the generated names
//! - [`ValidatePhase`] - runs lints over the classes that will be generated
//! - [`PlanPhase`] - allocates one output file per origin file
//! - [`EntityPhase`] - generates the data classes and enums
//! - [`MapperPhase`] - generates the `mapTo<Suffix>()` functions

mod entity;
mod mapper;
mod plan;
mod select;
mod validate;

pub use entity::EntityPhase;
pub use mapper::MapperPhase;
pub use plan::PlanPhase;
pub use select::{SelectPhase, UNSUPPORTED_SELECTION};
pub use validate::{
    DefaultValuesLint, ExistingNameLint, Lint, LintInfo, LintTarget, PrivateFieldsLint,
    ValidatePhase,
};
