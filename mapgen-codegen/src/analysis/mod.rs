//! Type resolution and classification.
//!
//! - [`TypeResolver`] - resolves written type references to declarations
//! - [`classify`] - closed classification of a resolved type ([`TypeClass`])
//! - [`reachable_classes`] - supported classes reachable from a root
//! - [`TypeParams`] - declared type parameters of a class

mod classify;
mod reach;
mod resolver;
mod type_params;

pub use classify::{CollectionKind, GenericBase, MapKind, TypeClass, UserKind, classify};
pub use reach::reachable_classes;
pub use resolver::{NameResolution, ProjectResolver, ResolvedArg, ResolvedType, TypeResolver};
pub use type_params::TypeParams;
