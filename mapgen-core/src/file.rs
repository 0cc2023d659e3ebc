use std::path::{Path, PathBuf};

use eyre::{Result, bail};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Undo log for a batch of writes.
///
/// Originals are saved before the first write; [`Rollback::restore`] removes
/// the files the batch created and puts the saved content back.
#[derive(Debug, Default)]
pub struct Rollback {
    created: Vec<PathBuf>,
    originals: Vec<(PathBuf, Vec<u8>)>,
}

impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current content of `path` if it is an existing file.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if path.is_file() {
            let content = std::fs::read(path)?;
            self.originals.push((path.to_path_buf(), content));
        }
        Ok(())
    }

    /// Record a file created by the batch.
    pub fn created(&mut self, path: impl Into<PathBuf>) {
        self.created.push(path.into());
    }

    /// Number of files that would be touched by [`Rollback::restore`].
    pub fn len(&self) -> usize {
        self.created.len() + self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove created files and restore saved ones.
    ///
    /// Missing created files are ignored; the first other error is returned
    /// after every path has been attempted.
    pub fn restore(&self) -> Result<()> {
        let mut first_error = None;
        for path in &self.created {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        for (path, content) in &self.originals {
            if let Err(e) = std::fs::write(path, content) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was created
    Created,
    /// An existing file was replaced
    Replaced,
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: never overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the write rules
    pub fn rules(&self) -> &FileRules {
        &self.rules
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Check whether writing would conflict with an existing file
    pub fn conflicts(&self) -> bool {
        self.rules.overwrite == Overwrite::Never && self.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        let existed = self.exists();
        if existed && self.rules.overwrite == Overwrite::Never {
            bail!("refusing to overwrite existing file {}", self.path.display());
        }
        write_file(&self.path, &self.content)?;
        Ok(if existed {
            WriteResult::Replaced
        } else {
            WriteResult::Created
        })
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    /// Rules that replace existing files
    pub fn overwrite() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Replace whatever is on disk
    Always,
    /// Refuse to touch an existing file
    #[default]
    Never,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("Test.kt");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("UserModel.kt");

        let result = File::new(&path, "package demo\n").write().unwrap();

        assert_eq!(result, WriteResult::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package demo\n");
    }

    #[test]
    fn test_file_write_refuses_existing_by_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("UserModel.kt");
        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "updated");

        assert!(file.conflicts());
        assert!(file.write().is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_file_write_always_replaces() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("UserModel.kt");
        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "updated").with_rules(FileRules::overwrite());

        assert!(!file.conflicts());
        assert_eq!(file.write().unwrap(), WriteResult::Replaced);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_rollback_removes_created_and_restores_saved() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("A.kt");
        fs::write(&existing, "user code").unwrap();
        let created = temp.path().join("B.kt");
        let missing = temp.path().join("C.kt");

        let mut rollback = Rollback::new();
        rollback.save(&existing).unwrap();
        rollback.save(&missing).unwrap();
        fs::write(&existing, "generated").unwrap();
        fs::write(&created, "generated").unwrap();
        rollback.created(&created);
        rollback.created(&missing);
        assert_eq!(rollback.len(), 3);

        rollback.restore().unwrap();

        assert_eq!(fs::read_to_string(&existing).unwrap(), "user code");
        assert!(!created.exists());
        assert!(!missing.exists());
    }
}
