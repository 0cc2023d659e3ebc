//! Language-independent generation machinery for mapgen.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`analysis`] - Type resolution, classification and reachability
//! - [`model`] - The in-memory output tree ([`model::Workspace`]) and its records
//! - [`generator`] - File planner, entity generator and mapper generator
//! - [`generation`] - Output management (ImportSet, FileRegistry)
//! - [`pipeline`] - Phase orchestration, diagnostics and plugins
//! - [`language`] - Traits implemented by target-language renderers

pub mod analysis;
pub mod builder;
mod error;
pub mod generation;
pub mod generator;
pub mod language;
pub mod model;
pub mod pipeline;

pub use error::GenerateError;

#[cfg(test)]
pub(crate) mod testing;
