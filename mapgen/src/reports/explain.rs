//! Explain command report data structures.

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    pub phases: Vec<PhaseInfo>,
    pub lints: Vec<LintInfo>,
    /// What a run for a given class would produce.
    pub selection: Option<SelectionInfo>,
}

/// Information about a pipeline phase.
#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// Information about a validation lint.
#[derive(Debug)]
pub struct LintInfo {
    pub name: String,
    pub description: String,
}

/// Planning results for a selected class.
#[derive(Debug)]
pub struct SelectionInfo {
    pub class: String,
    pub root: String,
    pub function: String,
    pub mapper: String,
    /// Generated classes, as `Source -> Generated`.
    pub classes: Vec<String>,
    pub files: Vec<String>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("mapgen Pipeline Explanation");
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }

        let Some(selection) = &self.selection else {
            return;
        };
        out.newline();
        out.key_value("Input", &selection.class);
        out.key_value_indented("Generated root", &selection.root);
        out.key_value_indented("Mapper function", &selection.function);
        out.key_value_indented("Mapper placement", &selection.mapper);
        out.newline();

        out.section("Generated Classes");
        for class in &selection.classes {
            out.list_item(class);
        }
        out.newline();

        out.section("Files to Generate");
        for file in &selection.files {
            out.list_item(file);
        }
    }
}
