//! Language-agnostic rendering traits.

use std::path::{Path, PathBuf};

use eyre::Result;

use crate::generation::FileCategory;

/// Trait for language-specific renderers of a generated workspace.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "kotlin")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "kt")
    fn file_extension(&self) -> &'static str;

    /// Render every file without writing to disk.
    fn preview(&self) -> Vec<PreviewFile>;

    /// Render and write every file below `base`, all or nothing.
    fn generate(&self, base: &Path) -> Result<GenerateResult>;
}

/// Result of writing the generated files
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that did not exist before
    pub created: Vec<PathBuf>,
    /// Existing files that were replaced
    pub replaced: Vec<PathBuf>,
}

impl GenerateResult {
    pub fn total(&self) -> usize {
        self.created.len() + self.replaced.len()
    }
}

/// A rendered file for preview
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Path relative to the base directory
    pub path: PathBuf,
    pub category: FileCategory,
    pub content: String,
}
