//! Kotlin source loading for mapgen.
//!
//! Turns `.kt` files into a [`mapgen_ir::Project`] and reads the optional
//! `mapgen.toml` configuration. All errors are [`miette`] diagnostics that
//! point at the offending source span.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod lexer;
mod loader;
mod parser;

pub use config::{CONFIG_FILE, Config, GeneratorConfig, MapperPlacement};
pub use error::{Error, Result, SourceContext};
pub use loader::{Loader, load_file, load_str};
pub use parser::{ParsedClass, ParsedFile, parse};
