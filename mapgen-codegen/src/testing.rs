//! Test fixtures shared by the unit tests of this crate.

use mapgen_ir::Project;
use mapgen_source::load_str;

/// Parse in-memory Kotlin files into a project.
pub fn project(files: &[(&str, &str)]) -> Project {
    let mut project = Project::new();
    for (path, content) in files {
        load_str(&mut project, path, content).expect("fixture should parse");
    }
    project
}
