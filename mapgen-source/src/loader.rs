//! Loading Kotlin sources from disk into a [`Project`].

use std::path::{Path, PathBuf};

use mapgen_ir::{FileId, Project};
use tracing::{debug, trace, warn};

use crate::{Error, Result, SourceContext, parser::parse};

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["build", "out", "target", "node_modules"];

/// Collects Kotlin files from one or more source roots.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    roots: Vec<PathBuf>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source root (a directory or a single `.kt` file).
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.roots.push(path.into());
        self
    }

    /// Parse every Kotlin file under the configured roots.
    pub fn load(&self) -> Result<Project> {
        let mut project = Project::new();
        for root in &self.roots {
            let files = collect_kotlin_files(root)?;
            if files.is_empty() {
                return Err(Box::new(Error::NoSources { path: root.clone() }));
            }
            for path in files {
                load_file(&mut project, &path)?;
            }
        }

        for class in project.classes() {
            let fq_name = project.qualified_name(class.id);
            if project.find(&fq_name) != Some(class.id) {
                warn!(class = %fq_name, "duplicate declaration, keeping the first one");
            }
        }

        debug!(
            files = project.files().len(),
            classes = project.classes().len(),
            "loaded Kotlin sources"
        );
        Ok(project)
    }
}

/// Read and parse one file into `project`.
pub fn load_file(project: &mut Project, path: &Path) -> Result<FileId> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    load_str(project, path, &content)
}

/// Parse in-memory Kotlin source into `project` as if it lived at `path`.
pub fn load_str(project: &mut Project, path: impl AsRef<Path>, content: &str) -> Result<FileId> {
    let path = path.as_ref();
    let ctx = SourceContext::new(content, path.display().to_string());
    let parsed = parse(&ctx)?;
    trace!(
        path = %path.display(),
        classes = parsed.classes.len(),
        "parsed Kotlin file"
    );
    Ok(parsed.register(project, path))
}

fn collect_kotlin_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if is_kotlin_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = std::fs::read_dir(&dir)
            .map_err(|e| Error::io(&dir, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::io(&dir, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if path.is_dir() {
                if !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref()) {
                    pending.push(path);
                }
            } else if is_kotlin_file(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn is_kotlin_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "kt")
}
