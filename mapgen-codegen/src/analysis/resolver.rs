//! Resolution of written type references.

use mapgen_ir::{ClassId, Project, TypeArg, TypeRef, Variance};
use serde::Serialize;

use super::TypeParams;

/// Names visible in every Kotlin file without an import, by package.
const KOTLIN_DEFAULT_TYPES: &[(&str, &[&str])] = &[
    (
        "kotlin",
        &[
            "Any", "Array", "Boolean", "BooleanArray", "Byte", "ByteArray", "Char", "CharArray",
            "CharSequence", "Comparable", "Double", "DoubleArray", "Enum", "Exception", "Float",
            "FloatArray", "Int", "IntArray", "Lazy", "Long", "LongArray", "Nothing", "Number",
            "Pair", "Result", "Short", "ShortArray", "String", "Throwable", "Triple", "UByte",
            "UInt", "ULong", "UShort", "Unit",
        ],
    ),
    (
        "kotlin.collections",
        &[
            "ArrayList", "Collection", "HashMap", "HashSet", "Iterable", "Iterator",
            "LinkedHashMap", "LinkedHashSet", "List", "ListIterator", "Map", "MutableCollection",
            "MutableIterable", "MutableList", "MutableMap", "MutableSet", "Set",
        ],
    ),
    ("kotlin.sequences", &["Sequence"]),
    (
        "kotlin.ranges",
        &["CharRange", "ClosedRange", "IntRange", "LongRange"],
    ),
    ("kotlin.text", &["Appendable", "Regex", "StringBuilder"]),
];

/// Where a simple name points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameResolution {
    pub fq_name: String,
    /// The local declaration, when the name refers to a parsed class.
    pub class: Option<ClassId>,
}

/// A type reference after name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    /// The reference as written.
    pub written: TypeRef,
    /// Fully-qualified name of the base type, when known.
    pub fq_name: Option<String>,
    /// Fully-qualified name of the first written segment; importing it makes
    /// the written name valid in another file.
    pub import: Option<String>,
    /// The local declaration of the base type.
    pub class: Option<ClassId>,
    pub args: Vec<ResolvedArg>,
}

impl ResolvedType {
    pub fn is_nullable(&self) -> bool {
        self.written.nullable
    }

    /// The base name as written (e.g. `List`, `Outer.Inner`).
    pub fn display_name(&self) -> &str {
        &self.written.name
    }

    /// Written type arguments including angle brackets, or an empty string.
    pub fn args_text(&self) -> String {
        let mut base = self.written.clone();
        base.nullable = false;
        let rendered = base.render();
        rendered
            .strip_prefix(base.name.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Nullability marker to append after a rendered replacement.
    pub fn nullable_suffix(&self) -> &'static str {
        if self.is_nullable() { "?" } else { "" }
    }
}

/// A resolved type argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolvedArg {
    Star,
    Type {
        variance: Variance,
        ty: ResolvedType,
    },
}

impl ResolvedArg {
    pub fn ty(&self) -> Option<&ResolvedType> {
        match self {
            ResolvedArg::Star => None,
            ResolvedArg::Type { ty, .. } => Some(ty),
        }
    }
}

/// Resolves the types written inside class declarations.
///
/// This is the seam to a real semantic model: the default implementation
/// only knows the parsed project and the Kotlin default imports.
pub trait TypeResolver {
    fn project(&self) -> &Project;

    /// Resolve a single simple name as seen from inside the class `scope`.
    ///
    /// Returns `None` for type variables and names that cannot be resolved.
    fn resolve_simple(&self, name: &str, scope: ClassId) -> Option<NameResolution>;

    /// Resolve a written reference, including its type arguments.
    fn resolve(&self, ty: &TypeRef, scope: ClassId) -> ResolvedType {
        let args = ty
            .args
            .iter()
            .map(|arg| match arg {
                TypeArg::Star => ResolvedArg::Star,
                TypeArg::Type { variance, ty } => ResolvedArg::Type {
                    variance: *variance,
                    ty: self.resolve(ty, scope),
                },
            })
            .collect();

        let mut resolved = ResolvedType {
            written: ty.clone(),
            fq_name: None,
            import: None,
            class: None,
            args,
        };
        if ty.function {
            resolved.args.clear();
            return resolved;
        }

        let project = self.project();
        let mut segments = ty.name.split('.');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();

        match self.resolve_simple(first, scope) {
            Some(head) => {
                let mut class = head.class;
                for segment in &rest {
                    class = class.and_then(|c| project.find_nested(c, segment));
                }
                let fq_name = if rest.is_empty() {
                    head.fq_name.clone()
                } else {
                    format!("{}.{}", head.fq_name, rest.join("."))
                };
                resolved.class = class.or_else(|| project.find(&fq_name));
                resolved.fq_name = Some(fq_name);
                resolved.import = Some(head.fq_name);
            }
            // A dotted name nobody declares is taken as fully qualified.
            None if !rest.is_empty() => {
                resolved.class = project.find(&ty.name);
                resolved.fq_name = Some(ty.name.clone());
            }
            None => {}
        }
        resolved
    }
}

/// Resolver over a parsed [`Project`].
///
/// Lookup order for a simple name: type parameters, classes nested in the
/// enclosing class chain, explicit imports, the file's package, star imports,
/// then Kotlin default imports.
#[derive(Debug, Clone, Copy)]
pub struct ProjectResolver<'a> {
    project: &'a Project,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    fn local(&self, fq_name: String) -> Option<NameResolution> {
        self.project.find(&fq_name).map(|class| NameResolution {
            fq_name,
            class: Some(class),
        })
    }
}

impl TypeResolver for ProjectResolver<'_> {
    fn project(&self) -> &Project {
        self.project
    }

    fn resolve_simple(&self, name: &str, scope: ClassId) -> Option<NameResolution> {
        let project = self.project;

        let mut current = Some(scope);
        while let Some(id) = current {
            let decl = project.class(id);
            if TypeParams::parse(decl.type_params.as_deref()).contains(name) {
                return None;
            }
            let found = project
                .find_nested(id, name)
                .or_else(|| (decl.name == name).then_some(id));
            if let Some(class) = found {
                return Some(NameResolution {
                    fq_name: project.qualified_name(class),
                    class: Some(class),
                });
            }
            current = decl.parent;
        }

        let file = project.file(project.class(scope).file);
        if let Some(import) = file
            .imports
            .iter()
            .find(|i| i.local_name() == Some(name))
        {
            return Some(NameResolution {
                fq_name: import.path.clone(),
                class: project.find(&import.path),
            });
        }

        let same_package = if file.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", file.package, name)
        };
        if let Some(found) = self.local(same_package) {
            return Some(found);
        }

        for import in file.imports.iter().filter(|i| i.star) {
            if let Some(found) = self.local(format!("{}.{}", import.path, name)) {
                return Some(found);
            }
        }

        KOTLIN_DEFAULT_TYPES
            .iter()
            .find(|(_, names)| names.contains(&name))
            .map(|(package, _)| NameResolution {
                fq_name: format!("{}.{}", package, name),
                class: None,
            })
    }
}
