//! The generation algorithm.
//!
//! - [`Planner`] - allocates one output file per origin file
//! - [`EntityGenerator`] - creates the generated data classes and enums
//! - [`MapperGenerator`] - creates the `mapTo<Suffix>()` functions
//! - [`analyze_args`] - rewrites generic type arguments for generated code

mod entity;
mod generic;
mod mapper;
mod planner;

use mapgen_ir::{ClassId, Project};
use serde::Serialize;

pub use entity::{EntityGenerator, EntityOutput, GeneratedClasses, Materialized};
pub use generic::{AnalyzedArg, ClassMaterializer, GenericArgs, Scope, analyze_args};
pub use mapper::MapperGenerator;
pub use planner::{GenerationPlan, PlannedOutput, Planner};

/// Names given to generated code.
#[derive(Debug, Clone, Serialize)]
pub struct Naming {
    /// The selected class.
    pub root: ClassId,
    /// Base name of the root's counterpart (the class name by default).
    pub root_name: String,
    pub suffix: String,
}

impl Naming {
    pub fn new(root: ClassId, root_name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            root,
            root_name: root_name.into(),
            suffix: suffix.into(),
        }
    }

    /// Name of the generated counterpart of `class`.
    pub fn class_name(&self, project: &Project, class: ClassId) -> String {
        if class == self.root {
            format!("{}{}", self.root_name, self.suffix)
        } else {
            format!("{}{}", project.class(class).name, self.suffix)
        }
    }

    /// Property name for a field whose type is a generated class.
    pub fn field_name(&self, field: &str) -> String {
        format!("{}{}", field, self.suffix)
    }

    /// Name of the conversion functions, e.g. `mapToModel`.
    pub fn function_name(&self) -> String {
        format!("mapTo{}", self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::project;

    #[test]
    fn test_naming() {
        let project = project(&[(
            "a/Foo.kt",
            "package a\ndata class Foo(val bar: Bar)\ndata class Bar(val x: Int)",
        )]);
        let foo = project.find("a.Foo").unwrap();
        let bar = project.find("a.Bar").unwrap();

        let naming = Naming::new(foo, "Foo", "Model");
        assert_eq!(naming.class_name(&project, foo), "FooModel");
        assert_eq!(naming.class_name(&project, bar), "BarModel");
        assert_eq!(naming.field_name("bar"), "barModel");
        assert_eq!(naming.function_name(), "mapToModel");

        let renamed = Naming::new(foo, "Account", "Dto");
        assert_eq!(renamed.class_name(&project, foo), "AccountDto");
        assert_eq!(renamed.class_name(&project, bar), "BarDto");
    }
}
