//! Check command report data structures.

use super::output::{Output, Report};

/// Report data from a dry generation run.
#[derive(Debug)]
pub struct CheckReport {
    /// Fully-qualified name of the selected class.
    pub source: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    /// Files the run would write.
    pub files: Vec<PlannedFile>,
}

/// A file the generation would write.
#[derive(Debug)]
pub struct PlannedFile {
    pub path: String,
    /// Top-level declarations, root first.
    pub declarations: Vec<String>,
    pub functions: usize,
    /// Whether a file already exists at the path.
    pub exists: bool,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.info(info);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.files.is_empty() {
            out.section("Planned files");
            for file in &self.files {
                let mut line = format!(
                    "{} ({}; {} mapper{})",
                    file.path,
                    if file.declarations.is_empty() {
                        "no declarations".to_string()
                    } else {
                        file.declarations.join(", ")
                    },
                    file.functions,
                    if file.functions == 1 { "" } else { "s" }
                );
                if file.exists {
                    line.push_str(" [exists]");
                }
                out.list_item(&line);
            }
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} can be generated", self.source));
        }
    }
}
