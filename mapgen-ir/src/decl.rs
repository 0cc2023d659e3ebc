//! Class declarations and their constructor fields.

use serde::Serialize;

use crate::{ClassId, FileId, TypeRef};

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassKind {
    /// `data class`
    Data,
    /// `enum class`
    Enum,
    /// Plain, open, abstract or sealed `class`
    Class,
    /// `interface` or `fun interface`
    Interface,
    /// `object` (including companion objects)
    Object,
    /// `annotation class`
    Annotation,
    /// `value class` / `inline class`
    Value,
}

impl ClassKind {
    /// Only data classes and enums get a generated counterpart.
    pub fn is_supported(&self) -> bool {
        matches!(self, ClassKind::Data | ClassKind::Enum)
    }

    /// Human readable keyword for reports.
    pub fn keyword(&self) -> &'static str {
        match self {
            ClassKind::Data => "data class",
            ClassKind::Enum => "enum class",
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Object => "object",
            ClassKind::Annotation => "annotation class",
            ClassKind::Value => "value class",
        }
    }
}

/// Declared visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// A primary-constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Parameter name (without backticks).
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Declared visibility.
    pub visibility: Visibility,
    /// Whether a default value is present.
    pub has_default: bool,
    /// Declared with `var`.
    pub mutable: bool,
    /// Declared with `val` or `var`.
    pub is_property: bool,
    /// Short names of annotations attached to the parameter.
    pub annotations: Vec<String>,
}

impl Field {
    /// Create a public `val` field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            has_default: false,
            mutable: false,
            is_property: true,
            annotations: Vec::new(),
        }
    }

    /// Private fields never take part in generation.
    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

/// An enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    /// Constant name.
    pub name: String,
    /// Constructor arguments including parentheses (e.g., `("#f00", 1)`).
    pub args: Option<String>,
}

impl EnumEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }
}

/// A class-like declaration found in a source file.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDecl {
    /// Arena id, assigned by [`crate::Project::add_class`].
    pub id: ClassId,
    /// Simple name.
    pub name: String,
    /// Declaration kind.
    pub kind: ClassKind,
    /// Defining file.
    pub file: FileId,
    /// Directly enclosing class, if nested.
    pub parent: Option<ClassId>,
    /// Declared type parameters, verbatim (e.g., `<T : Any>`).
    pub type_params: Option<String>,
    /// Primary-constructor parameters in declaration order.
    pub fields: Vec<Field>,
    /// Enum entries in declaration order.
    pub entries: Vec<EnumEntry>,
    /// Nested declarations.
    pub nested: Vec<ClassId>,
    /// Byte offset of the class name in its file.
    pub offset: usize,
}

impl ClassDecl {
    /// Create an empty declaration; the id is assigned when added to a project.
    pub fn new(name: impl Into<String>, kind: ClassKind, file: FileId) -> Self {
        Self {
            id: ClassId(0),
            name: name.into(),
            kind,
            file,
            parent: None,
            type_params: None,
            fields: Vec::new(),
            entries: Vec::new(),
            nested: Vec::new(),
            offset: 0,
        }
    }

    /// Add a constructor field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add an enum entry.
    pub fn entry(mut self, entry: EnumEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Set the enclosing class.
    pub fn nested_in(mut self, parent: ClassId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Fields that take part in generation (everything except private ones).
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_private())
    }

    pub fn is_supported(&self) -> bool {
        self.kind.is_supported()
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_kinds() {
        assert!(ClassKind::Data.is_supported());
        assert!(ClassKind::Enum.is_supported());
        assert!(!ClassKind::Class.is_supported());
        assert!(!ClassKind::Interface.is_supported());
        assert!(!ClassKind::Value.is_supported());
    }

    #[test]
    fn test_visible_fields_skip_private() {
        let mut secret = Field::new("secret", TypeRef::named("String"));
        secret.visibility = Visibility::Private;
        let decl = ClassDecl::new("User", ClassKind::Data, FileId(0))
            .field(Field::new("name", TypeRef::named("String")))
            .field(secret)
            .field(Field::new("age", TypeRef::named("Int")));

        let names: Vec<_> = decl.visible_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
    }
}
