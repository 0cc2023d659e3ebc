//! Kotlin declaration model for the mapgen generator.
//!
//! This crate holds the language model shared by the parser and the
//! generators: source files, class declarations, constructor fields and
//! syntactic type references.
//!
//! # Architecture
//!
//! ```text
//! *.kt → mapgen-source (parsing) → mapgen-ir (Project) → mapgen-codegen
//! ```
//!
//! Declarations are stored in a flat arena owned by [`Project`] and refer to
//! each other through [`ClassId`] and [`FileId`] handles, so cyclic class
//! graphs need no shared ownership.

mod decl;
mod project;
mod types;

pub use decl::{ClassDecl, ClassKind, EnumEntry, Field, Visibility};
pub use project::{ClassId, FileId, Import, Project, SourceFile};
pub use types::{BasicType, TypeArg, TypeRef, Variance};
