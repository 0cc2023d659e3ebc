use mapgen_ir::{ClassId, EnumEntry};
use serde::Serialize;

use super::OutputId;

/// Type text for values mapgen cannot convert; valid Kotlin and easy to find.
pub const PLACEHOLDER_TYPE: &str = "Any? /* Implement manually */";

/// Shape of a generated declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeneratedKind {
    Data,
    Enum,
    /// A data class source without non-private fields; Kotlin data classes
    /// need at least one parameter.
    Class,
}

/// A primary-constructor property of a generated declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedParam {
    pub name: String,
    /// Rendered type text.
    pub ty: String,
    /// `var` instead of `val`.
    pub mutable: bool,
}

impl GeneratedParam {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            mutable: false,
        }
    }

    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }
}

/// The generated counterpart of a source class.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDecl {
    pub name: String,
    pub kind: GeneratedKind,
    /// The class this declaration mirrors.
    pub source: ClassId,
    /// Type parameters copied from the source, verbatim.
    pub type_params: Option<String>,
    pub params: Vec<GeneratedParam>,
    /// Enum entries, copied from the source.
    pub entries: Vec<EnumEntry>,
    /// Declarations nested inside this one.
    pub nested: Vec<GeneratedDecl>,
}

impl GeneratedDecl {
    pub fn new(name: impl Into<String>, kind: GeneratedKind, source: ClassId) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
            type_params: None,
            params: Vec::new(),
            entries: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn find_nested(&self, name: &str) -> Option<&GeneratedDecl> {
        self.nested.iter().find(|d| d.name == name)
    }

    pub fn find_nested_mut(&mut self, name: &str) -> Option<&mut GeneratedDecl> {
        self.nested.iter_mut().find(|d| d.name == name)
    }
}

/// Address of a generated declaration: its file and name path from the
/// top-level declaration (e.g. `["OuterModel", "InnerModel"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeneratedRef {
    pub file: OutputId,
    pub path: Vec<String>,
}

impl GeneratedRef {
    pub fn top_level(file: OutputId, name: impl Into<String>) -> Self {
        Self {
            file,
            path: vec![name.into()],
        }
    }

    /// Reference to a declaration nested in this one.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(name.into());
        Self {
            file: self.file,
            path,
        }
    }

    /// Dotted name usable from the generated file's package.
    pub fn qualified_name(&self) -> String {
        self.path.join(".")
    }

    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ref_paths() {
        let outer = GeneratedRef::top_level(OutputId(0), "OuterModel");
        let inner = outer.child("InnerModel");

        assert_eq!(outer.qualified_name(), "OuterModel");
        assert_eq!(inner.qualified_name(), "OuterModel.InnerModel");
        assert_eq!(inner.name(), "InnerModel");
        assert_eq!(inner.file, outer.file);
    }
}
