//! Generation model: what will be written, before it is rendered.
//!
//! - [`Workspace`] - in-memory output tree; implements [`FileFactory`] and
//!   [`DeclarationEditor`]
//! - [`GeneratedDecl`] - a generated data class or enum
//! - [`MapperFn`] - a generated `mapTo<Suffix>()` extension function

mod decl;
mod mapper;
mod workspace;

pub use decl::{GeneratedDecl, GeneratedKind, GeneratedParam, GeneratedRef, PLACEHOLDER_TYPE};
pub use mapper::{Conversion, MapperArg, MapperBody, MapperFn, WhenArm};
pub use workspace::{
    Container, DeclarationEditor, FileFactory, FileRole, OutputFile, OutputId, Workspace,
};
