//! Kotlin rendering for mapgen.
//!
//! Turns the staged [`mapgen_codegen::model::Workspace`] into Kotlin
//! source files: data classes, enum classes and `mapTo<Suffix>()`
//! extension functions.

mod generator;
mod kotlin_file;
mod naming;

pub mod ast;

pub use ast::{Class, Declaration, EnumClass, EnumConstant, ExtensionFn, FnBody, NamedArg, Property};
pub use generator::{Generator, render_file};
pub use kotlin_file::KotlinFile;
pub use mapgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use naming::KOTLIN_NAMING;
