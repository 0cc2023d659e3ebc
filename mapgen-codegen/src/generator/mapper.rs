//! Generation of `mapTo<Suffix>()` extension functions.

use std::collections::{HashSet, VecDeque};

use mapgen_ir::{ClassId, Field};
use tracing::debug;

use super::{ClassMaterializer, GeneratedClasses, GenerationPlan, Naming, Scope, analyze_args};
use crate::{
    GenerateError,
    analysis::{
        GenericBase, ResolvedArg, ResolvedType, TypeClass, TypeParams, TypeResolver, UserKind,
        classify,
    },
    model::{
        Conversion, DeclarationEditor, GeneratedRef, MapperArg, MapperBody, MapperFn, OutputId,
        WhenArm,
    },
    pipeline::Diagnostic,
};

const PHASE: &str = "mapper";

/// Read-only view of the generated classes, for rendering type arguments.
struct Lookup<'c>(&'c GeneratedClasses);

impl ClassMaterializer for Lookup<'_> {
    fn materialize(
        &mut self,
        class: ClassId,
        _scope: &Scope,
    ) -> Result<Option<GeneratedRef>, GenerateError> {
        Ok(self.0.get(class).cloned())
    }
}

/// Where a conversion is being built, for imports and warnings.
struct Site<'s> {
    scope: &'s Scope,
    file: OutputId,
    field: &'s Field,
}

/// Creates one conversion function per generated class, starting at the
/// root and following the classes the conversions call into.
pub struct MapperGenerator<'a, R, W> {
    resolver: &'a R,
    plan: &'a GenerationPlan,
    naming: &'a Naming,
    classes: &'a GeneratedClasses,
    workspace: &'a mut W,
    visited: HashSet<ClassId>,
    pending: VecDeque<ClassId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, R, W> MapperGenerator<'a, R, W>
where
    R: TypeResolver,
    W: DeclarationEditor,
{
    pub fn new(
        resolver: &'a R,
        plan: &'a GenerationPlan,
        naming: &'a Naming,
        classes: &'a GeneratedClasses,
        workspace: &'a mut W,
    ) -> Self {
        Self {
            resolver,
            plan,
            naming,
            classes,
            workspace,
            visited: HashSet::new(),
            pending: VecDeque::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Generate the functions and return the diagnostics raised on the way.
    pub fn generate(mut self) -> Result<Vec<Diagnostic>, GenerateError> {
        self.request(self.naming.root);
        let mut functions = 0;
        while let Some(class) = self.pending.pop_front() {
            if self.function(class)? {
                functions += 1;
            }
        }
        debug!(functions, "generated mapper functions");
        Ok(self.diagnostics)
    }

    fn request(&mut self, class: ClassId) {
        if self.visited.insert(class) {
            self.pending.push_back(class);
        }
    }

    fn function(&mut self, class: ClassId) -> Result<bool, GenerateError> {
        let resolver = self.resolver;
        let project = resolver.project();
        let Some(target) = self.classes.get(class).cloned() else {
            if self.classes.is_skipped(class) {
                return Ok(false);
            }
            return Err(GenerateError::NotGenerated {
                class: project.qualified_name(class),
            });
        };

        let decl = project.class(class);
        let file = self.plan.mapper_file(target.file).unwrap_or(target.file);
        let type_params = TypeParams::parse(decl.type_params.as_deref());
        self.import_source(file, class);

        let body = if decl.is_enum() {
            MapperBody::EnumWhen {
                arms: self.arms(class, &target),
            }
        } else {
            let scope = Scope {
                class,
                target: target.clone(),
            };
            let mut args = Vec::new();
            for field in decl.visible_fields() {
                let site = Site {
                    scope: &scope,
                    file,
                    field,
                };
                args.push(self.arg(&site)?);
            }
            MapperBody::Construct {
                target: target.qualified_name(),
                args,
            }
        };

        self.workspace.add_function(
            file,
            MapperFn {
                source: class,
                type_params: type_params.as_function_declaration(),
                receiver: format!("{}{}", project.nested_path(class), type_params.as_arguments()),
                name: self.naming.function_name(),
                returns: format!("{}{}", target.qualified_name(), type_params.as_arguments()),
                body,
            },
        );
        Ok(true)
    }

    fn arg(&mut self, site: &Site<'_>) -> Result<MapperArg, GenerateError> {
        let resolver = self.resolver;
        let project = resolver.project();
        let field = site.field;
        let ty = resolver.resolve(&field.ty, site.scope.class);

        let (name, conversion) = match classify(project, &ty) {
            TypeClass::UserClass(id, kind) => match self.classes.get(id).cloned() {
                Some(target) => {
                    self.request(id);
                    let conversion = match kind {
                        UserKind::Data => Conversion::Mapper {
                            function: self.naming.function_name(),
                        },
                        UserKind::Enum => {
                            self.import_source(site.file, id);
                            Conversion::EnumWhen {
                                arms: self.arms(id, &target),
                            }
                        }
                    };
                    (self.naming.field_name(&field.name), conversion)
                }
                None => (field.name.clone(), Conversion::Placeholder),
            },
            TypeClass::Unsupported(_) => (field.name.clone(), Conversion::Placeholder),
            TypeClass::Generic(base, args) => {
                (field.name.clone(), self.generic(base, args, site)?)
            }
            TypeClass::Basic(_) | TypeClass::Opaque => (field.name.clone(), Conversion::Identity),
        };

        Ok(MapperArg {
            name,
            source: field.name.clone(),
            nullable: ty.is_nullable(),
            conversion,
        })
    }

    /// Conversion of a value nested inside a generic type.
    fn element(&mut self, ty: &ResolvedType, site: &Site<'_>) -> Result<Conversion, GenerateError> {
        let project = self.resolver.project();
        Ok(match classify(project, ty) {
            TypeClass::UserClass(id, _) if self.classes.get(id).is_some() => {
                self.request(id);
                Conversion::Mapper {
                    function: self.naming.function_name(),
                }
            }
            TypeClass::Generic(base, args) => self.generic(base, args, site)?,
            TypeClass::UserClass(..)
            | TypeClass::Unsupported(_)
            | TypeClass::Basic(_)
            | TypeClass::Opaque => Conversion::Identity,
        })
    }

    fn generic(
        &mut self,
        base: GenericBase,
        args: &[ResolvedArg],
        site: &Site<'_>,
    ) -> Result<Conversion, GenerateError> {
        let arg = |index: usize| args.get(index).and_then(ResolvedArg::ty);

        match base {
            GenericBase::Collection(kind) => match arg(0) {
                Some(element) => Ok(Conversion::collection(
                    self.element(element, site)?,
                    element.is_nullable(),
                    kind.collect_call(),
                )),
                None => Ok(Conversion::Identity),
            },
            GenericBase::Map(kind) => {
                let key = match arg(0) {
                    Some(key) => Some((self.element(key, site)?, key.is_nullable())),
                    None => None,
                };
                let value = match arg(1) {
                    Some(value) => Some((self.element(value, site)?, value.is_nullable())),
                    None => None,
                };
                let unchanged = |side: &Option<(Conversion, bool)>| {
                    side.as_ref().is_none_or(|(conversion, _)| conversion.is_identity())
                };
                if unchanged(&key) && unchanged(&value) {
                    return Ok(Conversion::Identity);
                }
                let (Some(key), Some(value)) = (key, value) else {
                    return Ok(self.placeholder(site, "a star-projected map"));
                };

                let project = self.resolver.project();
                let rendered = analyze_args(project, args, site.scope, &mut Lookup(self.classes))?;
                for fq in &rendered.imports {
                    self.workspace.add_reference(site.file, fq);
                }
                let builder = format!(
                    "{}{}",
                    kind.builder(),
                    rendered.invariant_text().unwrap_or_default()
                );
                Ok(Conversion::map(builder, key, value))
            }
            GenericBase::Pair => match (arg(0), arg(1)) {
                (Some(first), Some(second)) => Ok(Conversion::pair(
                    (self.element(first, site)?, first.is_nullable()),
                    (self.element(second, site)?, second.is_nullable()),
                )),
                _ => Ok(Conversion::Identity),
            },
            GenericBase::Other => {
                let mut changed = false;
                for ty in args.iter().filter_map(ResolvedArg::ty) {
                    changed |= !self.element(ty, site)?.is_identity();
                }
                if changed {
                    Ok(self.placeholder(site, "a generic type mapgen cannot traverse"))
                } else {
                    Ok(Conversion::Identity)
                }
            }
        }
    }

    fn placeholder(&mut self, site: &Site<'_>, what: &str) -> Conversion {
        let project = self.resolver.project();
        let owner = project.qualified_name(site.scope.class);
        self.diagnostics.push(
            Diagnostic::warning(
                PHASE,
                format!(
                    "`{}` holds generated classes inside {what}; convert it manually",
                    site.field.name
                ),
            )
            .at(format!("{owner}.{}", site.field.name)),
        );
        Conversion::Placeholder
    }

    /// One arm per entry, pairing equal names.
    fn arms(&self, class: ClassId, target: &GeneratedRef) -> Vec<WhenArm> {
        let project = self.resolver.project();
        let source = project.nested_path(class);
        let target = target.qualified_name();
        project
            .class(class)
            .entries
            .iter()
            .map(|entry| WhenArm {
                from: format!("{source}.{}", entry.name),
                to: format!("{target}.{}", entry.name),
            })
            .collect()
    }

    /// Make the source class nameable from `file`.
    fn import_source(&mut self, file: OutputId, class: ClassId) {
        let project = self.resolver.project();
        let outermost = project.qualified_name(project.outermost(class));
        self.workspace.add_reference(file, &outermost);
    }
}
