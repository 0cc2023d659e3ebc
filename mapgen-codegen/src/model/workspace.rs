//! In-memory output tree.
//!
//! Generators create files and mutate declarations only through the
//! [`FileFactory`] and [`DeclarationEditor`] traits; the [`Workspace`]
//! implementation stages everything in memory so that nothing reaches the
//! disk unless the whole run succeeds.

use std::path::{Path, PathBuf};

use mapgen_ir::Import;
use serde::Serialize;

use super::{GeneratedDecl, GeneratedRef, MapperFn};
use crate::{GenerateError, generation::ImportSet};

/// Identity of an output file inside a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OutputId(pub u32);

/// What an output file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileRole {
    /// Generated declarations, and mapper functions when they are inline.
    Entity,
    /// Only mapper functions.
    Mapper,
}

/// A staged output file.
#[derive(Debug, Clone, Serialize)]
pub struct OutputFile {
    pub id: OutputId,
    pub path: PathBuf,
    pub package: String,
    pub role: FileRole,
    pub imports: ImportSet,
    /// Top-level declarations in creation order.
    pub declarations: Vec<GeneratedDecl>,
    pub functions: Vec<MapperFn>,
}

impl OutputFile {
    /// File name without the `.kt` extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.functions.is_empty()
    }
}

/// Where a declaration is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    /// Top level of an output file.
    File(OutputId),
    /// Inside another generated declaration.
    Class(GeneratedRef),
}

impl Container {
    pub fn file(&self) -> OutputId {
        match self {
            Container::File(id) => *id,
            Container::Class(parent) => parent.file,
        }
    }
}

/// Creates output files.
pub trait FileFactory {
    /// Create a new empty output file.
    fn create_file(&mut self, path: PathBuf, package: &str, role: FileRole) -> OutputId;

    /// Find an already created output file by path.
    fn find_file(&self, path: &Path) -> Option<OutputId>;
}

/// Mutates generated declarations and their files.
pub trait DeclarationEditor {
    /// Whether `container` already holds a declaration called `name`.
    fn contains_declaration(&self, container: &Container, name: &str) -> bool;

    /// Attach a declaration and return its address.
    fn add_declaration(
        &mut self,
        container: &Container,
        decl: GeneratedDecl,
    ) -> Result<GeneratedRef, GenerateError>;

    fn declaration_mut(
        &mut self,
        target: &GeneratedRef,
    ) -> Result<&mut GeneratedDecl, GenerateError>;

    /// Copy an import directive into a file.
    fn add_import(&mut self, file: OutputId, import: &Import);

    /// Import a fully-qualified name unless it is already visible in the file.
    fn add_reference(&mut self, file: OutputId, fq_name: &str);

    fn add_function(&mut self, file: OutputId, function: MapperFn);
}

/// The staged output of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Workspace {
    files: Vec<OutputFile>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, id: OutputId) -> &OutputFile {
        &self.files[id.0 as usize]
    }

    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    /// Look up a generated declaration.
    pub fn declaration(&self, target: &GeneratedRef) -> Option<&GeneratedDecl> {
        let (first, rest) = target.path.split_first()?;
        let mut decl = self
            .file(target.file)
            .declarations
            .iter()
            .find(|d| &d.name == first)?;
        for name in rest {
            decl = decl.find_nested(name)?;
        }
        Some(decl)
    }

    fn file_mut(&mut self, id: OutputId) -> &mut OutputFile {
        &mut self.files[id.0 as usize]
    }
}

fn locate_mut<'a>(
    decls: &'a mut [GeneratedDecl],
    path: &[String],
) -> Option<&'a mut GeneratedDecl> {
    let (first, rest) = path.split_first()?;
    let decl = decls.iter_mut().find(|d| &d.name == first)?;
    if rest.is_empty() {
        Some(decl)
    } else {
        locate_mut(&mut decl.nested, rest)
    }
}

impl FileFactory for Workspace {
    fn create_file(&mut self, path: PathBuf, package: &str, role: FileRole) -> OutputId {
        let id = OutputId(self.files.len() as u32);
        self.files.push(OutputFile {
            id,
            path,
            package: package.to_string(),
            role,
            imports: ImportSet::new(),
            declarations: Vec::new(),
            functions: Vec::new(),
        });
        id
    }

    fn find_file(&self, path: &Path) -> Option<OutputId> {
        self.files.iter().find(|f| f.path == path).map(|f| f.id)
    }
}

impl DeclarationEditor for Workspace {
    fn contains_declaration(&self, container: &Container, name: &str) -> bool {
        match container {
            Container::File(id) => self.file(*id).declarations.iter().any(|d| d.name == name),
            Container::Class(parent) => self
                .declaration(parent)
                .is_some_and(|d| d.find_nested(name).is_some()),
        }
    }

    fn add_declaration(
        &mut self,
        container: &Container,
        decl: GeneratedDecl,
    ) -> Result<GeneratedRef, GenerateError> {
        match container {
            Container::File(id) => {
                let target = GeneratedRef::top_level(*id, decl.name.clone());
                self.file_mut(*id).declarations.push(decl);
                Ok(target)
            }
            Container::Class(parent) => {
                let target = parent.child(decl.name.clone());
                self.declaration_mut(parent)?.nested.push(decl);
                Ok(target)
            }
        }
    }

    fn declaration_mut(
        &mut self,
        target: &GeneratedRef,
    ) -> Result<&mut GeneratedDecl, GenerateError> {
        let file = self.file_mut(target.file);
        locate_mut(&mut file.declarations, &target.path).ok_or_else(|| {
            GenerateError::MissingDeclaration {
                path: target.qualified_name(),
                file: file.path.clone(),
            }
        })
    }

    fn add_import(&mut self, file: OutputId, import: &Import) {
        let output = self.file_mut(file);
        let same_package = !import.star
            && import.alias.is_none()
            && mapgen_core::package_of(&import.path) == output.package;
        if !same_package {
            output.imports.add_import(import);
        }
    }

    fn add_reference(&mut self, file: OutputId, fq_name: &str) {
        let output = self.file_mut(file);
        output.imports.add_reference(fq_name, &output.package);
    }

    fn add_function(&mut self, file: OutputId, function: MapperFn) {
        self.file_mut(file).functions.push(function);
    }
}

#[cfg(test)]
mod tests {
    use mapgen_ir::ClassId;

    use super::*;
    use crate::model::{GeneratedKind, GeneratedParam};

    fn decl(name: &str) -> GeneratedDecl {
        GeneratedDecl::new(name, GeneratedKind::Data, ClassId(0))
    }

    #[test]
    fn test_nested_declarations() {
        let mut ws = Workspace::new();
        let file = ws.create_file(PathBuf::from("a/OuterModel.kt"), "a", FileRole::Entity);

        let outer = ws.add_declaration(&Container::File(file), decl("OuterModel")).unwrap();
        let inner = ws
            .add_declaration(&Container::Class(outer.clone()), decl("InnerModel"))
            .unwrap();

        assert_eq!(inner.qualified_name(), "OuterModel.InnerModel");
        assert!(ws.contains_declaration(&Container::Class(outer.clone()), "InnerModel"));
        assert!(!ws.contains_declaration(&Container::File(file), "InnerModel"));

        ws.declaration_mut(&inner)
            .unwrap()
            .params
            .push(GeneratedParam::new("x", "Int"));
        assert_eq!(ws.declaration(&inner).unwrap().params.len(), 1);
    }

    #[test]
    fn test_missing_declaration_is_error() {
        let mut ws = Workspace::new();
        let file = ws.create_file(PathBuf::from("A.kt"), "", FileRole::Entity);
        let target = GeneratedRef::top_level(file, "Nope");

        assert!(matches!(
            ws.declaration_mut(&target),
            Err(GenerateError::MissingDeclaration { .. })
        ));
        assert!(
            ws.add_declaration(&Container::Class(target), decl("Child"))
                .is_err()
        );
    }

    #[test]
    fn test_find_file_and_stem() {
        let mut ws = Workspace::new();
        let id = ws.create_file(PathBuf::from("a/UserDto.kt"), "a", FileRole::Entity);

        assert_eq!(ws.find_file(Path::new("a/UserDto.kt")), Some(id));
        assert_eq!(ws.find_file(Path::new("a/Other.kt")), None);
        assert_eq!(ws.file(id).stem(), "UserDto");
        assert!(ws.file(id).is_empty());
    }

    #[test]
    fn test_imports_skip_same_package() {
        let mut ws = Workspace::new();
        let id = ws.create_file(PathBuf::from("a/UserDto.kt"), "a", FileRole::Entity);

        ws.add_import(id, &Import::symbol("a.User"));
        ws.add_import(id, &Import::symbol("java.util.UUID"));
        ws.add_reference(id, "b.Money");
        ws.add_reference(id, "kotlin.collections.List");

        assert_eq!(
            ws.file(id).imports.directives(),
            vec!["b.Money", "java.util.UUID"]
        );
    }
}
