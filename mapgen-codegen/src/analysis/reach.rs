use std::collections::HashSet;

use mapgen_ir::ClassId;

use super::{ResolvedArg, ResolvedType, TypeClass, TypeResolver, classify};

/// Supported classes reachable from `root` through non-private fields, root
/// first, in depth-first declaration order. Each class appears once.
pub fn reachable_classes(resolver: &impl TypeResolver, root: ClassId) -> Vec<ClassId> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    visit(resolver, root, &mut visited, &mut order);
    order
}

fn visit(
    resolver: &impl TypeResolver,
    class: ClassId,
    visited: &mut HashSet<ClassId>,
    order: &mut Vec<ClassId>,
) {
    if !visited.insert(class) {
        return;
    }
    order.push(class);
    for field in resolver.project().class(class).visible_fields() {
        let ty = resolver.resolve(&field.ty, class);
        visit_type(resolver, &ty, visited, order);
    }
}

fn visit_type(
    resolver: &impl TypeResolver,
    ty: &ResolvedType,
    visited: &mut HashSet<ClassId>,
    order: &mut Vec<ClassId>,
) {
    match classify(resolver.project(), ty) {
        TypeClass::UserClass(id, _) => visit(resolver, id, visited, order),
        TypeClass::Generic(_, args) => {
            for ty in args.iter().filter_map(ResolvedArg::ty) {
                visit_type(resolver, ty, visited, order);
            }
        }
        TypeClass::Basic(_) | TypeClass::Unsupported(_) | TypeClass::Opaque => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analysis::ProjectResolver, testing::project};

    #[test]
    fn test_reachable_handles_cycles() {
        let project = project(&[(
            "a/Model.kt",
            r#"
package a
data class A(val b: B, val list: List<C>)
data class B(val a: A?, private val hidden: D)
data class C(val tag: Tag)
data class D(val x: Int)
enum class Tag { X }
"#,
        )]);
        let resolver = ProjectResolver::new(&project);
        let root = project.find("a.A").unwrap();

        let names: Vec<&str> = reachable_classes(&resolver, root)
            .into_iter()
            .map(|id| project.class(id).name.as_str())
            .collect();

        assert_eq!(names, vec!["A", "B", "C", "Tag"]);
    }
}
