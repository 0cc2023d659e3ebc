//! Generic type argument analysis.

use mapgen_ir::{ClassId, Project};
use serde::Serialize;

use crate::{
    GenerateError,
    analysis::{ResolvedArg, ResolvedType, TypeClass, classify},
    model::{GeneratedRef, PLACEHOLDER_TYPE},
};

/// The class currently being generated and its counterpart.
#[derive(Debug, Clone)]
pub struct Scope {
    pub class: ClassId,
    pub target: GeneratedRef,
}

/// Produces generated counterparts for classes met inside type arguments.
pub trait ClassMaterializer {
    /// Counterpart of `class`, referenced from inside `scope`.
    ///
    /// `None` means the class has no counterpart (it was skipped).
    fn materialize(
        &mut self,
        class: ClassId,
        scope: &Scope,
    ) -> Result<Option<GeneratedRef>, GenerateError>;
}

/// One rewritten type argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedArg {
    /// Use-site variance prefix (`""`, `"in "` or `"out "`).
    pub projection: &'static str,
    /// Rewritten type; `None` for a star projection.
    pub ty: Option<String>,
}

impl AnalyzedArg {
    pub fn render(&self) -> String {
        match &self.ty {
            Some(ty) => format!("{}{}", self.projection, ty),
            None => "*".to_string(),
        }
    }
}

/// Result of [`analyze_args`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenericArgs {
    pub args: Vec<AnalyzedArg>,
    /// Generated classes the arguments refer to.
    pub dependencies: Vec<GeneratedRef>,
    /// Fully-qualified names the rewritten text needs imported.
    pub imports: Vec<String>,
    /// Classes rendered as placeholders.
    pub unsupported: Vec<ClassId>,
}

impl GenericArgs {
    /// `<A, out B, *>`
    pub fn text(&self) -> String {
        let args: Vec<String> = self.args.iter().map(AnalyzedArg::render).collect();
        format!("<{}>", args.join(", "))
    }

    /// Argument list usable in a constructor call, or `None` when a star
    /// projection makes the type impossible to instantiate.
    pub fn invariant_text(&self) -> Option<String> {
        let args = self
            .args
            .iter()
            .map(|arg| arg.ty.clone())
            .collect::<Option<Vec<String>>>()?;
        Some(format!("<{}>", args.join(", ")))
    }
}

/// Rewrite type arguments so they refer to generated classes.
///
/// Supported classes are materialized first, unsupported ones become the
/// placeholder type, nested generics are rewritten recursively and anything
/// else is kept as written. Argument nullability stays on the argument.
pub fn analyze_args(
    project: &Project,
    args: &[ResolvedArg],
    scope: &Scope,
    materializer: &mut impl ClassMaterializer,
) -> Result<GenericArgs, GenerateError> {
    let mut out = GenericArgs::default();
    for arg in args {
        let analyzed = match arg {
            ResolvedArg::Star => AnalyzedArg {
                projection: "",
                ty: None,
            },
            ResolvedArg::Type { variance, ty } => AnalyzedArg {
                projection: variance.prefix(),
                ty: Some(render_one(project, ty, scope, materializer, &mut out)?),
            },
        };
        out.args.push(analyzed);
    }
    Ok(out)
}

fn render_one(
    project: &Project,
    ty: &ResolvedType,
    scope: &Scope,
    materializer: &mut impl ClassMaterializer,
    out: &mut GenericArgs,
) -> Result<String, GenerateError> {
    let rendered = match classify(project, ty) {
        TypeClass::UserClass(id, _) => match materializer.materialize(id, scope)? {
            Some(generated) => {
                let text = format!(
                    "{}{}{}",
                    generated.qualified_name(),
                    ty.args_text(),
                    ty.nullable_suffix()
                );
                out.dependencies.push(generated);
                text
            }
            None => {
                out.unsupported.push(id);
                PLACEHOLDER_TYPE.to_string()
            }
        },
        TypeClass::Unsupported(id) => {
            out.unsupported.push(id);
            PLACEHOLDER_TYPE.to_string()
        }
        TypeClass::Generic(_, args) => {
            out.imports.extend(ty.import.clone());
            let inner = analyze_args(project, args, scope, materializer)?;
            out.dependencies.extend(inner.dependencies.iter().cloned());
            out.imports.extend(inner.imports.iter().cloned());
            out.unsupported.extend(inner.unsupported.iter().copied());
            format!(
                "{}{}{}",
                ty.display_name(),
                inner.text(),
                ty.nullable_suffix()
            )
        }
        TypeClass::Basic(_) | TypeClass::Opaque => {
            out.imports.extend(ty.import.clone());
            ty.written.render()
        }
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        analysis::{ProjectResolver, TypeResolver},
        model::OutputId,
        testing::project,
    };

    /// Names the counterpart of class N `CNDto`, at the top level of file 0.
    #[derive(Default)]
    struct Recorder {
        calls: HashMap<ClassId, usize>,
        skip: Option<ClassId>,
    }

    impl ClassMaterializer for Recorder {
        fn materialize(
            &mut self,
            class: ClassId,
            _scope: &Scope,
        ) -> Result<Option<GeneratedRef>, GenerateError> {
            *self.calls.entry(class).or_default() += 1;
            if self.skip == Some(class) {
                return Ok(None);
            }
            Ok(Some(GeneratedRef::top_level(OutputId(0), format!("C{}Dto", class.0))))
        }
    }

    const SOURCE: &str = r#"
package a

import java.time.Instant

data class Root(
    val nested: Map<String, List<User?>>,
    val projected: List<out User>,
    val star: Map<*, Color>,
    val services: List<Service>,
    val times: Set<Instant>,
)

data class User(val name: String)
enum class Color { RED }
interface Service
"#;

    fn field_args(project: &Project, name: &str) -> Vec<ResolvedArg> {
        let root = project.find("a.Root").unwrap();
        let field = project
            .class(root)
            .fields
            .iter()
            .find(|f| f.name == name)
            .unwrap();
        ProjectResolver::new(project).resolve(&field.ty, root).args
    }

    fn scope(project: &Project) -> Scope {
        Scope {
            class: project.find("a.Root").unwrap(),
            target: GeneratedRef::top_level(OutputId(0), "RootDto"),
        }
    }

    #[test]
    fn test_nested_generics_are_rewritten() {
        let project = project(&[("a/Root.kt", SOURCE)]);
        let user = project.find("a.User").unwrap();
        let mut recorder = Recorder::default();

        let args = analyze_args(
            &project,
            &field_args(&project, "nested"),
            &scope(&project),
            &mut recorder,
        )
        .unwrap();

        let user_dto = format!("C{}Dto", user.0);
        assert_eq!(args.text(), format!("<String, List<{user_dto}?>>"));
        assert_eq!(args.dependencies.len(), 1);
        assert_eq!(recorder.calls[&user], 1);
    }

    #[test]
    fn test_variance_and_star_are_kept() {
        let project = project(&[("a/Root.kt", SOURCE)]);
        let user = project.find("a.User").unwrap();
        let color = project.find("a.Color").unwrap();
        let mut recorder = Recorder::default();

        let projected = analyze_args(
            &project,
            &field_args(&project, "projected"),
            &scope(&project),
            &mut recorder,
        )
        .unwrap();
        assert_eq!(projected.text(), format!("<out C{}Dto>", user.0));
        assert_eq!(projected.invariant_text(), Some(format!("<C{}Dto>", user.0)));

        let star = analyze_args(
            &project,
            &field_args(&project, "star"),
            &scope(&project),
            &mut recorder,
        )
        .unwrap();
        assert_eq!(star.text(), format!("<*, C{}Dto>", color.0));
        assert_eq!(star.invariant_text(), None);
    }

    #[test]
    fn test_unsupported_and_skipped_become_placeholders() {
        let project = project(&[("a/Root.kt", SOURCE)]);
        let service = project.find("a.Service").unwrap();
        let user = project.find("a.User").unwrap();
        let mut recorder = Recorder {
            skip: Some(user),
            ..Default::default()
        };

        let services = analyze_args(
            &project,
            &field_args(&project, "services"),
            &scope(&project),
            &mut recorder,
        )
        .unwrap();
        assert_eq!(services.text(), format!("<{PLACEHOLDER_TYPE}>"));
        assert_eq!(services.unsupported, vec![service]);

        let skipped = analyze_args(
            &project,
            &field_args(&project, "projected"),
            &scope(&project),
            &mut recorder,
        )
        .unwrap();
        assert_eq!(skipped.unsupported, vec![user]);
        assert!(skipped.dependencies.is_empty());
    }

    #[test]
    fn test_opaque_arguments_report_imports() {
        let project = project(&[("a/Root.kt", SOURCE)]);
        let mut recorder = Recorder::default();

        let times = analyze_args(
            &project,
            &field_args(&project, "times"),
            &scope(&project),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(times.text(), "<Instant>");
        assert_eq!(times.imports, vec!["java.time.Instant".to_string()]);
        assert!(recorder.calls.is_empty());
    }
}
