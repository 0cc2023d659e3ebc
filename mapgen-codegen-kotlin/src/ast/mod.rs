//! Kotlin AST builders for generated classes, enums and extension functions.
//!
//! These provide a high-level API for constructing Kotlin syntax, which is
//! then rendered via CodeBuilder.

mod classes;
mod expr;
mod functions;

pub use classes::{Class, Declaration, EnumClass, EnumConstant, Property};
pub use expr::{Expression, PLACEHOLDER_EXPR, When, conversion};
pub use functions::{ExtensionFn, FnBody, NamedArg};

/// Lines up to this width are kept on one line.
pub const MAX_LINE_WIDTH: usize = 100;
