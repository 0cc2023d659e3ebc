//! Closed classification of resolved types.

use mapgen_ir::{BasicType, ClassId, ClassKind, Project};
use serde::Serialize;

use super::{ResolvedArg, ResolvedType};

/// Which supported kind a user class is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserKind {
    Data,
    Enum,
}

/// Collection families whose elements are mapped one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollectionKind {
    Iterable,
    Collection,
    MutableCollection,
    List,
    MutableList,
    ArrayList,
    Set,
    MutableSet,
    HashSet,
    LinkedHashSet,
    Sequence,
    Array,
}

impl CollectionKind {
    fn from_fq_name(fq: &str) -> Option<Self> {
        Some(match fq {
            "kotlin.collections.Iterable" => Self::Iterable,
            "kotlin.collections.Collection" => Self::Collection,
            "kotlin.collections.MutableCollection" => Self::MutableCollection,
            "kotlin.collections.List" => Self::List,
            "kotlin.collections.MutableList" => Self::MutableList,
            "kotlin.collections.ArrayList" | "java.util.ArrayList" => Self::ArrayList,
            "kotlin.collections.Set" => Self::Set,
            "kotlin.collections.MutableSet" => Self::MutableSet,
            "kotlin.collections.HashSet" | "java.util.HashSet" => Self::HashSet,
            "kotlin.collections.LinkedHashSet" | "java.util.LinkedHashSet" => Self::LinkedHashSet,
            "kotlin.sequences.Sequence" => Self::Sequence,
            "kotlin.Array" => Self::Array,
            _ => return None,
        })
    }

    /// Call turning the `List` produced by `map` back into this family.
    pub fn collect_call(&self) -> Option<&'static str> {
        match self {
            Self::Iterable | Self::Collection | Self::List | Self::Sequence => None,
            Self::MutableCollection | Self::MutableList => Some("toMutableList()"),
            Self::ArrayList => Some("toCollection(ArrayList())"),
            Self::Set => Some("toSet()"),
            Self::MutableSet => Some("toMutableSet()"),
            Self::HashSet => Some("toHashSet()"),
            Self::LinkedHashSet => Some("toCollection(LinkedHashSet())"),
            Self::Array => Some("toTypedArray()"),
        }
    }
}

/// Map families, rebuilt entry by entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MapKind {
    Map,
    MutableMap,
    HashMap,
    LinkedHashMap,
}

impl MapKind {
    fn from_fq_name(fq: &str) -> Option<Self> {
        Some(match fq {
            "kotlin.collections.Map" => Self::Map,
            "kotlin.collections.MutableMap" => Self::MutableMap,
            "kotlin.collections.HashMap" | "java.util.HashMap" => Self::HashMap,
            "kotlin.collections.LinkedHashMap" | "java.util.LinkedHashMap" => Self::LinkedHashMap,
            _ => return None,
        })
    }

    /// Concrete class instantiated when rebuilding.
    pub fn builder(&self) -> &'static str {
        match self {
            Self::LinkedHashMap => "LinkedHashMap",
            Self::Map | Self::MutableMap | Self::HashMap => "HashMap",
        }
    }
}

/// Family of a generic base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenericBase {
    Collection(CollectionKind),
    Map(MapKind),
    Pair,
    /// Any other parametrized type; arguments are rewritten but values are
    /// not converted.
    Other,
}

impl GenericBase {
    fn from_fq_name(fq: Option<&str>) -> Self {
        let Some(fq) = fq else {
            return Self::Other;
        };
        if let Some(kind) = CollectionKind::from_fq_name(fq) {
            Self::Collection(kind)
        } else if let Some(kind) = MapKind::from_fq_name(fq) {
            Self::Map(kind)
        } else if fq == "kotlin.Pair" {
            Self::Pair
        } else {
            Self::Other
        }
    }
}

/// Classification of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass<'a> {
    /// A Kotlin built-in scalar.
    Basic(BasicType),
    /// A local data class or enum; gets a generated counterpart.
    UserClass(ClassId, UserKind),
    /// Any other local class; rendered as a manual-implementation placeholder.
    Unsupported(ClassId),
    /// A parametrized type whose base is not a supported local class.
    Generic(GenericBase, &'a [ResolvedArg]),
    /// Everything else (library types, type variables, function types).
    Opaque,
}

/// Classify a resolved type.
///
/// Classification uses fully-qualified names only, so a local class named
/// `String` is a user class, not [`BasicType::String`].
pub fn classify<'a>(project: &Project, ty: &'a ResolvedType) -> TypeClass<'a> {
    if ty.written.function {
        return TypeClass::Opaque;
    }
    if let Some(id) = ty.class {
        let decl = project.class(id);
        match decl.kind {
            ClassKind::Data => return TypeClass::UserClass(id, UserKind::Data),
            ClassKind::Enum => return TypeClass::UserClass(id, UserKind::Enum),
            _ if ty.args.is_empty() => return TypeClass::Unsupported(id),
            _ => return TypeClass::Generic(GenericBase::Other, &ty.args),
        }
    }
    if !ty.args.is_empty() {
        return TypeClass::Generic(GenericBase::from_fq_name(ty.fq_name.as_deref()), &ty.args);
    }
    match ty.fq_name.as_deref().and_then(BasicType::from_fq_name) {
        Some(basic) => TypeClass::Basic(basic),
        None => TypeClass::Opaque,
    }
}

#[cfg(test)]
mod tests {
    use mapgen_ir::ClassId;

    use super::*;
    use crate::{
        analysis::{ProjectResolver, TypeResolver},
        testing::project,
    };

    const SOURCE: &str = r#"
package a

data class Root(
    val count: Int,
    val name: String,
    val user: User,
    val color: Color?,
    val service: Service,
    val users: List<User>,
    val byId: MutableMap<Long, User>,
    val pair: Pair<User, Color>,
    val box: Box<User>,
    val id: java.util.UUID,
    val cb: (Int) -> Unit,
    val ids: LinkedHashSet<Long>,
)

data class User(val name: String)
enum class Color { RED }
interface Service
class Box<T>(val value: T)
"#;

    fn resolve(project: &Project, field: &str) -> ResolvedType {
        let root = project.find("a.Root").unwrap();
        let field = project
            .class(root)
            .fields
            .iter()
            .find(|f| f.name == field)
            .unwrap();
        ProjectResolver::new(project).resolve(&field.ty, root)
    }

    fn class_of(project: &Project, field: &str) -> String {
        let ty = resolve(project, field);
        match classify(project, &ty) {
            TypeClass::Basic(b) => format!("basic {}", b.name()),
            TypeClass::UserClass(ClassId(_), kind) => format!("user {kind:?}"),
            TypeClass::Unsupported(_) => "unsupported".to_string(),
            TypeClass::Generic(base, args) => format!("generic {base:?} {}", args.len()),
            TypeClass::Opaque => "opaque".to_string(),
        }
    }

    #[test]
    fn test_classification() {
        let project = project(&[("a/Root.kt", SOURCE)]);

        assert_eq!(class_of(&project, "count"), "basic Int");
        assert_eq!(class_of(&project, "name"), "basic String");
        assert_eq!(class_of(&project, "user"), "user Data");
        assert_eq!(class_of(&project, "color"), "user Enum");
        assert_eq!(class_of(&project, "service"), "unsupported");
        assert_eq!(class_of(&project, "users"), "generic Collection(List) 1");
        assert_eq!(class_of(&project, "byId"), "generic Map(MutableMap) 2");
        assert_eq!(class_of(&project, "pair"), "generic Pair 2");
        assert_eq!(class_of(&project, "box"), "generic Other 1");
        assert_eq!(class_of(&project, "id"), "opaque");
        assert_eq!(class_of(&project, "cb"), "opaque");
        assert_eq!(
            class_of(&project, "ids"),
            "generic Collection(LinkedHashSet) 1"
        );
    }

    #[test]
    fn test_collect_calls() {
        assert_eq!(CollectionKind::List.collect_call(), None);
        assert_eq!(CollectionKind::Set.collect_call(), Some("toSet()"));
        assert_eq!(
            CollectionKind::MutableList.collect_call(),
            Some("toMutableList()")
        );
        assert_eq!(MapKind::LinkedHashMap.builder(), "LinkedHashMap");
        assert_eq!(MapKind::MutableMap.builder(), "HashMap");
    }
}
