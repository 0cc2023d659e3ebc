//! Registry of rendered files and their all-or-nothing commit.
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::entity("src/UserModel.kt", user_kt));
//! registry.register(FileEntry::mapper("src/UserModelMapper.kt", mapper_kt));
//!
//! // Either every file is written or none is kept.
//! registry.commit(Path::new("."))?;
//! ```

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};
use mapgen_core::{File, FileRules, Overwrite, Rollback, WriteResult};
use serde::Serialize;
use tracing::{debug, warn};

/// Kind of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FileCategory {
    /// Generated data classes and enums (and inline mappers).
    Entity,
    /// A separate file holding only mapper functions.
    Mapper,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Entity => "entity",
            FileCategory::Mapper => "mapper",
        }
    }
}

/// A file to be generated.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the commit base (absolute paths are kept as is).
    pub path: PathBuf,
    pub content: String,
    pub category: FileCategory,
    pub overwrite: Overwrite,
}

impl FileEntry {
    pub fn new(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
            overwrite: Overwrite::Never,
        }
    }

    pub fn entity(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Entity)
    }

    pub fn mapper(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Mapper)
    }

    /// Override the default overwrite behavior.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn rules(&self) -> FileRules {
        FileRules {
            overwrite: self.overwrite,
        }
    }

    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn to_file(&self, base: &Path) -> File {
        File::new(self.full_path(base), self.content.as_str()).with_rules(self.rules())
    }
}

/// Registry for collecting rendered files before they are written.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preview all files without touching the disk (besides existence checks).
    pub fn preview(&self, base: &Path) -> Vec<PreviewEntry> {
        self.entries
            .iter()
            .map(|e| PreviewEntry {
                path: e.path.clone(),
                content: e.content.clone(),
                category: e.category,
                exists: e.full_path(base).exists(),
            })
            .collect()
    }

    /// Paths that would be refused because they exist and may not be replaced.
    pub fn conflicts(&self, base: &Path) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|e| e.to_file(base).conflicts())
            .map(|e| e.path.clone())
            .collect()
    }

    /// Write every registered file, or none of them.
    ///
    /// All targets are checked and the files about to be replaced are read
    /// back before the first write. If a write fails midway, created files
    /// are removed and replaced files get their previous content again.
    pub fn commit(&self, base: &Path) -> Result<WriteStats> {
        let conflicts = self.conflicts(base);
        if !conflicts.is_empty() {
            let list: Vec<String> = conflicts.iter().map(|p| p.display().to_string()).collect();
            bail!(
                "refusing to overwrite existing file(s): {} (use --force to replace them)",
                list.join(", ")
            );
        }

        let mut rollback = Rollback::new();
        for entry in &self.entries {
            if entry.overwrite == Overwrite::Always {
                let path = entry.full_path(base);
                rollback
                    .save(&path)
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            }
        }

        let mut stats = WriteStats::default();
        for entry in &self.entries {
            let file = entry.to_file(base);
            match file.write() {
                Ok(WriteResult::Created) => {
                    debug!(path = %entry.path.display(), "created");
                    rollback.created(file.path());
                    stats.created_paths.push(entry.path.clone());
                }
                Ok(WriteResult::Replaced) => {
                    debug!(path = %entry.path.display(), "replaced");
                    stats.replaced_paths.push(entry.path.clone());
                }
                Err(err) => {
                    warn!(
                        path = %entry.path.display(),
                        rollback = rollback.len(),
                        "write failed, rolling back"
                    );
                    if let Err(cleanup) = rollback.restore() {
                        return Err(err.wrap_err(format!("rollback also failed: {cleanup}")));
                    }
                    return Err(err);
                }
            }
        }
        Ok(stats)
    }
}

/// A preview entry for displaying what would be generated.
#[derive(Debug, Clone)]
pub struct PreviewEntry {
    pub path: PathBuf,
    pub content: String,
    pub category: FileCategory,
    /// Whether a file is already present at the target path.
    pub exists: bool,
}

/// Statistics from a commit.
#[derive(Debug, Default)]
pub struct WriteStats {
    pub created_paths: Vec<PathBuf>,
    pub replaced_paths: Vec<PathBuf>,
}

impl WriteStats {
    pub fn created(&self) -> usize {
        self.created_paths.len()
    }

    pub fn replaced(&self) -> usize {
        self.replaced_paths.len()
    }

    pub fn total(&self) -> usize {
        self.created() + self.replaced()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_commit_writes_all() {
        let temp = TempDir::new().unwrap();
        let mut registry = FileRegistry::new();
        registry.register(FileEntry::entity("a/UserModel.kt", "class A"));
        registry.register(FileEntry::mapper("a/UserModelMapper.kt", "fun x() {}"));

        let stats = registry.commit(temp.path()).unwrap();

        assert_eq!(stats.created(), 2);
        assert_eq!(stats.replaced(), 0);
        assert_eq!(
            fs::read_to_string(temp.path().join("a/UserModel.kt")).unwrap(),
            "class A"
        );
    }

    #[test]
    fn test_conflict_writes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Existing.kt"), "user code").unwrap();

        let mut registry = FileRegistry::new();
        registry.register(FileEntry::entity("Fresh.kt", "new"));
        registry.register(FileEntry::entity("Existing.kt", "generated"));

        let err = registry.commit(temp.path()).unwrap_err();

        assert!(err.to_string().contains("Existing.kt"));
        assert!(!temp.path().join("Fresh.kt").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("Existing.kt")).unwrap(),
            "user code"
        );
    }

    #[test]
    fn test_overwrite_replaces() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Existing.kt"), "old").unwrap();

        let mut registry = FileRegistry::new();
        registry
            .register(FileEntry::entity("Existing.kt", "new").with_overwrite(Overwrite::Always));

        let stats = registry.commit(temp.path()).unwrap();
        assert_eq!(stats.replaced(), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("Existing.kt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_failed_write_rolls_back_created_files() {
        let temp = TempDir::new().unwrap();
        // A directory where a file should go makes the second write fail.
        fs::create_dir_all(temp.path().join("Blocked.kt")).unwrap();

        let mut registry = FileRegistry::new();
        registry.register(FileEntry::entity("First.kt", "first"));
        registry.register(
            FileEntry::entity("Blocked.kt", "second").with_overwrite(Overwrite::Always),
        );

        assert!(registry.commit(temp.path()).is_err());
        assert!(!temp.path().join("First.kt").exists());
    }

    #[test]
    fn test_failed_write_restores_replaced_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Existing.kt"), "user code").unwrap();
        fs::create_dir_all(temp.path().join("Blocked.kt")).unwrap();

        let mut registry = FileRegistry::new();
        registry.register(
            FileEntry::entity("Existing.kt", "generated").with_overwrite(Overwrite::Always),
        );
        registry.register(
            FileEntry::entity("Blocked.kt", "second").with_overwrite(Overwrite::Always),
        );

        assert!(registry.commit(temp.path()).is_err());
        assert_eq!(
            fs::read_to_string(temp.path().join("Existing.kt")).unwrap(),
            "user code"
        );
    }

    #[test]
    fn test_preview_reports_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("B.kt"), "").unwrap();

        let mut registry = FileRegistry::new();
        registry.register(FileEntry::entity("A.kt", "a"));
        registry.register(FileEntry::mapper("B.kt", "b"));

        let preview = registry.preview(temp.path());
        assert_eq!(preview.len(), 2);
        assert!(!preview[0].exists);
        assert!(preview[1].exists);
        assert_eq!(preview[1].category, FileCategory::Mapper);
        assert!(temp.path().join("B.kt").exists());
    }
}
