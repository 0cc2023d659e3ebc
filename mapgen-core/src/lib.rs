//! Core utilities and types for the mapgen Kotlin mapper generator.
//!
//! This crate provides the file-writing primitives and the identifier
//! helpers shared by the parser, the generators and the CLI.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, Overwrite, Rollback, WriteResult};
// String utilities
pub use utils::{
    MAX_IDENTIFIER_LEN, filter_identifier, is_identifier, package_of, short_name, strip_backticks,
};
