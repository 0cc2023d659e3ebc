//! List command report data structures.

use super::output::{Output, Report};

/// Declarations found in the sources.
#[derive(Debug)]
pub struct ListReport {
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug)]
pub struct ClassEntry {
    /// Fully-qualified name.
    pub name: String,
    /// Declaration keyword (`data class`, `enum class`, ...).
    pub kind: &'static str,
    pub file: String,
    /// Whether the class can be selected for generation.
    pub supported: bool,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.classes.is_empty() {
            out.preformatted("No classes found");
            return;
        }

        let selectable = self.classes.iter().filter(|c| c.supported).count();
        out.section(&format!(
            "Classes ({} of {} selectable)",
            selectable,
            self.classes.len()
        ));
        for class in &self.classes {
            let marker = if class.supported { "" } else { " (not selectable)" };
            out.list_item(&format!("{} [{}] {}{}", class.name, class.kind, class.file, marker));
        }
    }
}
