//! Project model: source files and the class arena.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::ClassDecl;

/// Identity of a source file inside a [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u32);

/// Identity of a class declaration inside a [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

/// An import directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Import {
    /// Imported path without the trailing `.*`.
    pub path: String,
    /// `as` alias.
    pub alias: Option<String>,
    /// Star import (`import a.b.*`).
    pub star: bool,
}

impl Import {
    /// Import a single symbol.
    pub fn symbol(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            star: false,
        }
    }

    /// Import every symbol of a package.
    pub fn star(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            star: true,
        }
    }

    /// Name the import introduces into scope (alias or last segment).
    ///
    /// Star imports introduce no single name.
    pub fn local_name(&self) -> Option<&str> {
        if self.star {
            return None;
        }
        Some(
            self.alias
                .as_deref()
                .unwrap_or_else(|| self.path.rsplit('.').next().unwrap_or(&self.path)),
        )
    }

    /// Directive text after the `import` keyword.
    pub fn text(&self) -> String {
        match (&self.alias, self.star) {
            (_, true) => format!("{}.*", self.path),
            (Some(alias), false) => format!("{} as {}", self.path, alias),
            (None, false) => self.path.clone(),
        }
    }
}

/// A parsed Kotlin source file.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub id: FileId,
    /// Path as loaded (relative to the working directory or absolute).
    pub path: PathBuf,
    /// Declared package (empty for the default package).
    pub package: String,
    /// Import directives in source order.
    pub imports: Vec<Import>,
    /// Top-level class declarations.
    pub classes: Vec<ClassId>,
}

impl SourceFile {
    /// Directory containing the file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// All parsed files and class declarations of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    files: Vec<SourceFile>,
    classes: Vec<ClassDecl>,
    #[serde(skip)]
    by_fq_name: HashMap<String, ClassId>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source file.
    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        package: impl Into<String>,
        imports: Vec<Import>,
    ) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile {
            id,
            path: path.into(),
            package: package.into(),
            imports,
            classes: Vec::new(),
        });
        id
    }

    /// Register a class declaration and link it to its file or parent.
    ///
    /// A class whose fully-qualified name is already registered keeps the
    /// first registration in the name index.
    pub fn add_class(&mut self, mut decl: ClassDecl) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        decl.id = id;
        match decl.parent {
            Some(parent) => self.classes[parent.0 as usize].nested.push(id),
            None => self.files[decl.file.0 as usize].classes.push(id),
        }
        let fq_name = self.fq_name_of(&decl);
        self.classes.push(decl);
        self.by_fq_name.entry(fq_name).or_insert(id);
        id
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize]
    }

    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id.0 as usize]
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    /// Look up a class by fully-qualified name.
    pub fn find(&self, fq_name: &str) -> Option<ClassId> {
        self.by_fq_name.get(fq_name).copied()
    }

    /// Classes with the given simple name, in declaration order.
    pub fn find_by_simple_name(&self, name: &str) -> Vec<ClassId> {
        self.classes
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.id)
            .collect()
    }

    /// Direct nested class of `parent` with the given simple name.
    pub fn find_nested(&self, parent: ClassId, name: &str) -> Option<ClassId> {
        self.class(parent)
            .nested
            .iter()
            .copied()
            .find(|id| self.class(*id).name == name)
    }

    /// Name relative to the package (e.g., "Outer.Inner").
    pub fn nested_path(&self, id: ClassId) -> String {
        let mut segments = vec![self.class(id).name.as_str()];
        let mut current = self.class(id).parent;
        while let Some(parent) = current {
            segments.push(self.class(parent).name.as_str());
            current = self.class(parent).parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// Fully-qualified name (e.g., "com.example.Outer.Inner").
    pub fn qualified_name(&self, id: ClassId) -> String {
        self.fq_name_of(self.class(id))
    }

    /// Package of the file defining the class.
    pub fn package_of(&self, id: ClassId) -> &str {
        &self.file(self.class(id).file).package
    }

    /// Whether `child` is declared directly inside `parent`.
    pub fn is_nested_in(&self, child: ClassId, parent: ClassId) -> bool {
        self.class(child).parent == Some(parent)
    }

    /// Outermost enclosing class (the class itself when top-level).
    pub fn outermost(&self, id: ClassId) -> ClassId {
        let mut current = id;
        while let Some(parent) = self.class(current).parent {
            current = parent;
        }
        current
    }

    fn fq_name_of(&self, decl: &ClassDecl) -> String {
        let mut path = decl.name.clone();
        let mut current = decl.parent;
        while let Some(parent) = current {
            let parent = &self.classes[parent.0 as usize];
            path = format!("{}.{}", parent.name, path);
            current = parent.parent;
        }
        let package = &self.files[decl.file.0 as usize].package;
        if package.is_empty() {
            path
        } else {
            format!("{}.{}", package, path)
        }
    }
}
