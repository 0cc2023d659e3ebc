//! Language-specific abstractions.
//!
//! - [`LanguageCodegen`] - trait implemented by target-language renderers
//! - [`NamingConvention`] - reserved words and how to escape them
//! - [`GenerateResult`] - result of writing the rendered files
//! - [`PreviewFile`] - a rendered file that has not been written

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::{GenerateResult, LanguageCodegen, PreviewFile};
