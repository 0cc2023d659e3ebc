//! Generation of data class and enum counterparts.

use std::collections::HashSet;

use indexmap::IndexMap;
use mapgen_ir::{ClassId, Field};
use serde::Serialize;
use tracing::{debug, warn};

use super::{ClassMaterializer, GenerationPlan, Naming, Scope, analyze_args};
use crate::{
    GenerateError,
    analysis::{ResolvedArg, ResolvedType, TypeClass, TypeResolver, classify},
    model::{
        Container, DeclarationEditor, GeneratedDecl, GeneratedKind, GeneratedParam, GeneratedRef,
        OutputId, PLACEHOLDER_TYPE,
    },
    pipeline::Diagnostic,
};

const PHASE: &str = "entity";

/// Outcome of generating one source class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Materialized {
    Generated(GeneratedRef),
    /// Another declaration already used the name.
    Skipped,
}

impl Materialized {
    pub fn generated(&self) -> Option<&GeneratedRef> {
        match self {
            Materialized::Generated(target) => Some(target),
            Materialized::Skipped => None,
        }
    }
}

/// Every class visited by the entity generator, in generation order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedClasses {
    entries: IndexMap<ClassId, Materialized>,
}

impl GeneratedClasses {
    /// Counterpart of `class`, if it was generated.
    pub fn get(&self, class: ClassId) -> Option<&GeneratedRef> {
        self.entries.get(&class).and_then(Materialized::generated)
    }

    pub fn contains(&self, class: ClassId) -> bool {
        self.entries.contains_key(&class)
    }

    pub fn is_skipped(&self, class: ClassId) -> bool {
        matches!(self.entries.get(&class), Some(Materialized::Skipped))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &Materialized)> {
        self.entries.iter().map(|(id, m)| (*id, m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, class: ClassId, materialized: Materialized) {
        self.entries.insert(class, materialized);
    }
}

/// Result of [`EntityGenerator::generate`].
#[derive(Debug, Clone)]
pub struct EntityOutput {
    /// Counterpart of the selected class.
    pub root: GeneratedRef,
    pub classes: GeneratedClasses,
    pub diagnostics: Vec<Diagnostic>,
}

/// Creates the generated counterpart of the root class and, recursively,
/// of every supported class its fields refer to.
///
/// A class is registered before its fields are processed, so cyclic class
/// graphs terminate and every class is generated at most once.
pub struct EntityGenerator<'a, R, W> {
    resolver: &'a R,
    plan: &'a GenerationPlan,
    naming: &'a Naming,
    workspace: &'a mut W,
    classes: GeneratedClasses,
    imported: HashSet<(ClassId, OutputId)>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, R, W> EntityGenerator<'a, R, W>
where
    R: TypeResolver,
    W: DeclarationEditor,
{
    pub fn new(
        resolver: &'a R,
        plan: &'a GenerationPlan,
        naming: &'a Naming,
        workspace: &'a mut W,
    ) -> Self {
        Self {
            resolver,
            plan,
            naming,
            workspace,
            classes: GeneratedClasses::default(),
            imported: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn generate(mut self) -> Result<EntityOutput, GenerateError> {
        let root = self.naming.root;
        let target = self
            .ensure(root, None)?
            .ok_or_else(|| GenerateError::NotGenerated {
                class: self.resolver.project().qualified_name(root),
            })?;
        debug!(
            classes = self.classes.len(),
            root = %target.qualified_name(),
            "generated entities"
        );
        Ok(EntityOutput {
            root: target,
            classes: self.classes,
            diagnostics: self.diagnostics,
        })
    }

    fn ensure(
        &mut self,
        class: ClassId,
        scope: Option<&Scope>,
    ) -> Result<Option<GeneratedRef>, GenerateError> {
        if let Some(known) = self.classes.entries.get(&class) {
            return Ok(known.generated().cloned());
        }

        let resolver = self.resolver;
        let project = resolver.project();
        let decl = project.class(class);
        let name = self.naming.class_name(project, class);
        let container = match scope {
            Some(scope) if project.is_nested_in(class, scope.class) => {
                Container::Class(scope.target.clone())
            }
            _ => {
                let file = self.plan.entity_file(decl.file).ok_or_else(|| {
                    GenerateError::PlanningViolation {
                        class: project.qualified_name(class),
                        origin: project.file(decl.file).path.clone(),
                    }
                })?;
                Container::File(file)
            }
        };

        if self.workspace.contains_declaration(&container, &name) {
            let fq_name = project.qualified_name(class);
            warn!(class = %fq_name, name = %name, "generated name already taken");
            self.diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    format!("`{name}` already exists; `{fq_name}` was not generated"),
                )
                .at(fq_name),
            );
            self.classes.insert(class, Materialized::Skipped);
            return Ok(None);
        }

        let mut shell = GeneratedDecl::new(
            name,
            if decl.is_enum() {
                GeneratedKind::Enum
            } else {
                GeneratedKind::Data
            },
            class,
        );
        shell.type_params = decl.type_params.clone();
        shell.entries = decl.entries.clone();
        let target = self.workspace.add_declaration(&container, shell)?;
        self.classes.insert(class, Materialized::Generated(target.clone()));
        debug!(
            class = %project.qualified_name(class),
            target = %target.qualified_name(),
            "generating"
        );

        self.copy_imports(class, target.file);

        let scope = Scope {
            class,
            target: target.clone(),
        };
        let mut params = Vec::new();
        for field in decl.visible_fields() {
            params.push(self.param(field, &scope)?);
        }

        let generated = self.workspace.declaration_mut(&target)?;
        generated.params = params;
        if generated.kind == GeneratedKind::Data && generated.params.is_empty() {
            generated.kind = GeneratedKind::Class;
            let fq_name = project.qualified_name(class);
            self.diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    format!(
                        "`{fq_name}` has no non-private constructor properties; `{}` is generated as a plain class",
                        target.qualified_name()
                    ),
                )
                .at(fq_name),
            );
        }
        Ok(Some(target))
    }

    fn param(&mut self, field: &Field, scope: &Scope) -> Result<GeneratedParam, GenerateError> {
        let resolver = self.resolver;
        let project = resolver.project();
        let ty = resolver.resolve(&field.ty, scope.class);
        let file = scope.target.file;

        let param = match classify(project, &ty) {
            TypeClass::UserClass(id, _) => match self.ensure(id, Some(scope))? {
                Some(generated) => {
                    self.reference_args(file, &ty.args);
                    GeneratedParam::new(
                        self.naming.field_name(&field.name),
                        format!(
                            "{}{}{}",
                            generated.qualified_name(),
                            ty.args_text(),
                            ty.nullable_suffix()
                        ),
                    )
                }
                None => GeneratedParam::new(&field.name, PLACEHOLDER_TYPE),
            },
            TypeClass::Unsupported(id) => {
                self.warn_unsupported(scope.class, field, id);
                GeneratedParam::new(&field.name, PLACEHOLDER_TYPE)
            }
            TypeClass::Generic(_, args) => {
                let analyzed = analyze_args(project, args, scope, self)?;
                if let Some(fq) = &ty.import {
                    self.workspace.add_reference(file, fq);
                }
                for fq in &analyzed.imports {
                    self.workspace.add_reference(file, fq);
                }
                for id in &analyzed.unsupported {
                    self.warn_unsupported(scope.class, field, *id);
                }
                GeneratedParam::new(
                    &field.name,
                    format!(
                        "{}{}{}",
                        ty.display_name(),
                        analyzed.text(),
                        ty.nullable_suffix()
                    ),
                )
            }
            TypeClass::Basic(_) | TypeClass::Opaque => {
                self.reference(file, &ty);
                GeneratedParam::new(&field.name, field.ty.render())
            }
        };
        Ok(param.mutable(field.mutable))
    }

    /// Origin imports, minus the ones naming annotations of copied fields.
    fn copy_imports(&mut self, class: ClassId, file: OutputId) {
        if !self.imported.insert((class, file)) {
            return;
        }
        let resolver = self.resolver;
        let project = resolver.project();
        let decl = project.class(class);
        let annotations: HashSet<&str> = decl
            .visible_fields()
            .flat_map(|f| f.annotations.iter().map(String::as_str))
            .collect();
        for import in &project.file(decl.file).imports {
            let is_annotation = import
                .local_name()
                .is_some_and(|name| annotations.contains(name));
            if !is_annotation {
                self.workspace.add_import(file, import);
            }
        }
    }

    fn reference(&mut self, file: OutputId, ty: &ResolvedType) {
        if let Some(fq) = &ty.import {
            self.workspace.add_reference(file, fq);
        }
        self.reference_args(file, &ty.args);
    }

    fn reference_args(&mut self, file: OutputId, args: &[ResolvedArg]) {
        for ty in args.iter().filter_map(ResolvedArg::ty) {
            self.reference(file, ty);
        }
    }

    fn warn_unsupported(&mut self, class: ClassId, field: &Field, unsupported: ClassId) {
        let project = self.resolver.project();
        let owner = project.qualified_name(class);
        let unsupported = project.qualified_name(unsupported);
        self.diagnostics.push(
            Diagnostic::warning(
                PHASE,
                format!(
                    "`{unsupported}` is not a data class or enum; implement `{}` manually",
                    field.name
                ),
            )
            .at(format!("{owner}.{}", field.name)),
        );
    }
}

impl<R, W> ClassMaterializer for EntityGenerator<'_, R, W>
where
    R: TypeResolver,
    W: DeclarationEditor,
{
    fn materialize(
        &mut self,
        class: ClassId,
        scope: &Scope,
    ) -> Result<Option<GeneratedRef>, GenerateError> {
        self.ensure(class, Some(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::ProjectResolver,
        generator::Planner,
        model::{FileFactory, FileRole, Workspace},
        testing::project,
    };

    struct Generated {
        workspace: Workspace,
        output: EntityOutput,
    }

    fn generate(files: &[(&str, &str)], root: &str, suffix: &str) -> Generated {
        let project = project(files);
        let resolver = ProjectResolver::new(&project);
        let root = project.find(root).unwrap();
        let naming = Naming::new(root, project.class(root).name.clone(), suffix);
        let mut workspace = Workspace::new();
        let plan = Planner::new(&resolver, &naming).plan(&mut workspace).unwrap();
        let output = EntityGenerator::new(&resolver, &plan, &naming, &mut workspace)
            .generate()
            .unwrap();
        Generated { workspace, output }
    }

    fn decl<'w>(workspace: &'w Workspace, path: &[&str]) -> &'w GeneratedDecl {
        workspace
            .files()
            .iter()
            .find_map(|file| {
                let target = GeneratedRef {
                    file: file.id,
                    path: path.iter().map(|s| s.to_string()).collect(),
                };
                workspace.declaration(&target)
            })
            .unwrap_or_else(|| panic!("no declaration {path:?}"))
    }

    fn params(decl: &GeneratedDecl) -> Vec<(String, String)> {
        decl.params
            .iter()
            .map(|p| (p.name.clone(), p.ty.clone()))
            .collect()
    }

    fn pair(name: &str, ty: &str) -> (String, String) {
        (name.to_string(), ty.to_string())
    }

    #[test]
    fn test_basic_fields_are_copied() {
        let generated = generate(
            &[(
                "demo/Address.kt",
                "package demo\ndata class Address(val city: String, var zip: Int)",
            )],
            "demo.Address",
            "Dto",
        );

        let address = decl(&generated.workspace, &["AddressDto"]);
        assert_eq!(address.kind, GeneratedKind::Data);
        assert_eq!(
            params(address),
            vec![pair("city", "String"), pair("zip", "Int")]
        );
        assert!(!address.params[0].mutable);
        assert!(address.params[1].mutable);
    }

    #[test]
    fn test_user_class_fields_get_suffix() {
        let generated = generate(
            &[(
                "demo/User.kt",
                r#"
package demo
data class User(val name: String, val address: Address, val backup: Address?)
data class Address(val city: String)
"#,
            )],
            "demo.User",
            "Dto",
        );

        let user = decl(&generated.workspace, &["UserDto"]);
        assert_eq!(
            params(user),
            vec![
                pair("name", "String"),
                pair("addressDto", "AddressDto"),
                pair("backupDto", "AddressDto?"),
            ]
        );
        // Root first, then its dependencies.
        let file = &generated.workspace.files()[0];
        let names: Vec<&str> = file.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["UserDto", "AddressDto"]);
    }

    #[test]
    fn test_cycles_terminate() {
        let generated = generate(
            &[(
                "demo/Tree.kt",
                r#"
package demo
data class Node(val parent: Node?, val children: List<Node>, val tree: Tree)
data class Tree(val root: Node)
"#,
            )],
            "demo.Node",
            "Model",
        );

        assert_eq!(generated.output.classes.len(), 2);
        let node = decl(&generated.workspace, &["NodeModel"]);
        assert_eq!(
            params(node),
            vec![
                pair("parentModel", "NodeModel?"),
                pair("children", "List<NodeModel>"),
                pair("treeModel", "TreeModel"),
            ]
        );
        let tree = decl(&generated.workspace, &["TreeModel"]);
        assert_eq!(params(tree), vec![pair("rootModel", "NodeModel")]);
    }

    #[test]
    fn test_nested_classes_stay_nested() {
        let generated = generate(
            &[(
                "demo/Outer.kt",
                r#"
package demo
data class Outer(val inner: Inner, val other: Other.Deep) {
    data class Inner(val value: Int)
}
data class Other(val id: Int) {
    data class Deep(val flag: Boolean)
}
"#,
            )],
            "demo.Outer",
            "Model",
        );

        let outer = decl(&generated.workspace, &["OuterModel"]);
        assert_eq!(outer.nested.len(), 1);
        assert_eq!(
            params(outer),
            vec![
                pair("innerModel", "OuterModel.InnerModel"),
                pair("otherModel", "DeepModel"),
            ]
        );
        // Not nested in the class that referenced it: top level of its file.
        decl(&generated.workspace, &["DeepModel"]);
    }

    #[test]
    fn test_enum_entries_are_copied() {
        let generated = generate(
            &[(
                "demo/Color.kt",
                r##"
package demo
enum class Color(val hex: String) { RED("#f00"), GREEN("#0f0") }
"##,
            )],
            "demo.Color",
            "Model",
        );

        let color = decl(&generated.workspace, &["ColorModel"]);
        assert_eq!(color.kind, GeneratedKind::Enum);
        assert_eq!(params(color), vec![pair("hex", "String")]);
        let entries: Vec<(&str, Option<&str>)> = color
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.args.as_deref()))
            .collect();
        assert_eq!(
            entries,
            vec![("RED", Some("(\"#f00\")")), ("GREEN", Some("(\"#0f0\")"))]
        );
    }

    #[test]
    fn test_unsupported_and_private_fields() {
        let generated = generate(
            &[(
                "demo/Order.kt",
                r#"
package demo
data class Order(val id: Long, private val secret: String, val service: Service, val items: List<Service>)
interface Service
"#,
            )],
            "demo.Order",
            "Model",
        );

        let order = decl(&generated.workspace, &["OrderModel"]);
        assert_eq!(
            params(order),
            vec![
                pair("id", "Long"),
                pair("service", PLACEHOLDER_TYPE),
                pair("items", &format!("List<{PLACEHOLDER_TYPE}>")),
            ]
        );
        let warnings = generated
            .output
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_generics_and_type_params() {
        let generated = generate(
            &[(
                "demo/Page.kt",
                r#"
package demo
data class Page<T : Any>(
    val items: List<T>,
    val byId: Map<Long, User?>?,
    val pairs: Pair<User, Color>,
    val holder: Holder<String>,
)
data class User(val name: String)
data class Holder<V>(val value: V)
enum class Color { RED }
"#,
            )],
            "demo.Page",
            "Dto",
        );

        let page = decl(&generated.workspace, &["PageDto"]);
        assert_eq!(page.type_params.as_deref(), Some("<T : Any>"));
        assert_eq!(
            params(page),
            vec![
                pair("items", "List<T>"),
                pair("byId", "Map<Long, UserDto?>?"),
                pair("pairs", "Pair<UserDto, ColorDto>"),
                pair("holderDto", "HolderDto<String>"),
            ]
        );
    }

    #[test]
    fn test_empty_class_becomes_plain_class() {
        let generated = generate(
            &[(
                "demo/Marker.kt",
                "package demo\ndata class Marker(private val id: Int)",
            )],
            "demo.Marker",
            "Model",
        );

        let marker = decl(&generated.workspace, &["MarkerModel"]);
        assert_eq!(marker.kind, GeneratedKind::Class);
        assert!(generated.output.diagnostics[0].message.contains("plain class"));
    }

    #[test]
    fn test_imports_follow_references() {
        let generated = generate(
            &[
                (
                    "app/Account.kt",
                    r#"
package app

import java.time.Instant
import javax.annotation.Nonnull
import shared.Money

data class Account(@Nonnull val created: Instant, val balance: Money)
"#,
                ),
                ("shared/Money.kt", "package shared\nclass Money(val cents: Long)"),
            ],
            "app.Account",
            "Model",
        );

        let file = &generated.workspace.files()[0];
        assert_eq!(file.imports.directives(), vec!["java.time.Instant", "shared.Money"]);
    }

    #[test]
    fn test_missing_plan_entry_is_violation() {
        let project = project(&[(
            "demo/User.kt",
            "package demo\ndata class User(val address: Address)\ndata class Address(val city: String)",
        )]);
        let resolver = ProjectResolver::new(&project);
        let naming = Naming::new(project.find("demo.User").unwrap(), "User", "Model");
        let mut workspace = Workspace::new();
        workspace.create_file("demo/UserModel.kt".into(), "demo", FileRole::Entity);

        let plan = GenerationPlan::default();
        let err = EntityGenerator::new(&resolver, &plan, &naming, &mut workspace)
            .generate()
            .unwrap_err();

        assert!(matches!(err, GenerateError::PlanningViolation { .. }));
        assert!(err.to_string().starts_with("File doesn't exist"));
    }

    #[test]
    fn test_name_collision_is_skipped() {
        let generated = generate(
            &[(
                "demo/Shapes.kt",
                r#"
package demo
data class Shapes(val a: First.Item, val b: Second.Item)
data class First(val x: Int) {
    data class Item(val id: Int)
}
data class Second(val y: Int) {
    data class Item(val id: String)
}
"#,
            )],
            "demo.Shapes",
            "Model",
        );

        let shapes = decl(&generated.workspace, &["ShapesModel"]);
        assert_eq!(
            params(shapes),
            vec![pair("aModel", "ItemModel"), pair("b", PLACEHOLDER_TYPE)]
        );
        let skipped = generated
            .output
            .classes
            .iter()
            .filter(|(_, m)| **m == Materialized::Skipped)
            .count();
        assert_eq!(skipped, 1);
        assert!(
            generated
                .output
                .diagnostics
                .iter()
                .any(|d| d.message.contains("already exists"))
        );
    }
}
