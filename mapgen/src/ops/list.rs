//! List operation - declarations found in the sources.

use mapgen_ir::Project;

use crate::reports::{ClassEntry, ListReport};

/// Execute the list operation.
pub fn list(project: &Project) -> ListReport {
    let mut classes: Vec<ClassEntry> = project
        .classes()
        .iter()
        .map(|class| ClassEntry {
            name: project.qualified_name(class.id),
            kind: class.kind.keyword(),
            file: project.file(class.file).path.display().to_string(),
            supported: class.is_supported(),
        })
        .collect();
    classes.sort_by(|a, b| a.name.cmp(&b.name));

    ListReport { classes }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ops::testing::{USER, project};

    #[test]
    fn test_list_classes() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), &[("demo/User.kt", USER)]);

        let report = list(&project);
        let names: Vec<(&str, &str, bool)> = report
            .classes
            .iter()
            .map(|c| (c.name.as_str(), c.kind, c.supported))
            .collect();

        assert_eq!(
            names,
            vec![
                ("demo.Address", "data class", true),
                ("demo.Repository", "interface", false),
                ("demo.User", "data class", true),
            ]
        );
    }
}
