use std::path::Path;

use eyre::Result;
use mapgen_codegen::{
    generation::{FileCategory, FileEntry, FileRegistry},
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    model::{FileRole, GeneratedDecl, GeneratedKind, MapperBody, MapperFn, OutputFile, Workspace},
};
use mapgen_core::Overwrite;
use tracing::debug;

use crate::{
    KOTLIN_NAMING, KotlinFile,
    ast::{
        Class, Declaration, EnumClass, EnumConstant, ExtensionFn, FnBody, NamedArg, Property,
        When, conversion,
    },
};

/// Kotlin renderer for a staged [`Workspace`].
pub struct Generator<'a> {
    workspace: &'a Workspace,
    overwrite: bool,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.files()
            .map(|file| PreviewFile {
                path: file.path.clone(),
                category: category(file),
                content: render_file(file),
            })
            .collect()
    }

    fn generate(&self, base: &Path) -> Result<GenerateResult> {
        let mut registry = FileRegistry::new();
        for file in self.files() {
            let content = render_file(file);
            let entry = match file.role {
                FileRole::Entity => FileEntry::entity(&file.path, content),
                FileRole::Mapper => FileEntry::mapper(&file.path, content),
            };
            registry.register(if self.overwrite {
                entry.with_overwrite(Overwrite::Always)
            } else {
                entry
            });
        }

        let stats = registry.commit(base)?;
        debug!(
            created = stats.created(),
            replaced = stats.replaced(),
            "workspace written"
        );
        Ok(GenerateResult {
            created: stats.created_paths,
            replaced: stats.replaced_paths,
        })
    }
}

impl<'a> Generator<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            overwrite: false,
        }
    }

    /// Replace files that already exist instead of refusing to write.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Files with something to write; a mapper file stays empty when every
    /// function landed elsewhere.
    fn files(&self) -> impl Iterator<Item = &'a OutputFile> {
        self.workspace.files().iter().filter(|file| !file.is_empty())
    }
}

fn category(file: &OutputFile) -> FileCategory {
    match file.role {
        FileRole::Entity => FileCategory::Entity,
        FileRole::Mapper => FileCategory::Mapper,
    }
}

/// Render one output file to Kotlin source.
pub fn render_file(file: &OutputFile) -> String {
    KotlinFile::new(&file.package)
        .imports(file.imports.directives())
        .add_all(file.declarations.iter().map(declaration))
        .add_all(file.functions.iter().map(function))
        .prune_imports()
        .render()
}

fn properties(decl: &GeneratedDecl) -> impl Iterator<Item = Property> + '_ {
    decl.params
        .iter()
        .map(|param| Property::new(&param.name, &param.ty).mutable(param.mutable))
}

fn declaration(decl: &GeneratedDecl) -> Declaration {
    let nested = decl.nested.iter().map(declaration);
    match decl.kind {
        GeneratedKind::Enum => {
            let enum_class = properties(decl).fold(EnumClass::new(&decl.name), EnumClass::property);
            let enum_class = decl.entries.iter().fold(enum_class, |e, entry| {
                let constant = EnumConstant::new(&entry.name);
                e.constant(match &entry.args {
                    Some(args) => constant.args(args),
                    None => constant,
                })
            });
            Declaration::Enum(nested.fold(enum_class, EnumClass::nested))
        }
        GeneratedKind::Data | GeneratedKind::Class => {
            let class = if decl.kind == GeneratedKind::Data {
                Class::data(&decl.name)
            } else {
                Class::new(&decl.name)
            };
            let class = match &decl.type_params {
                Some(type_params) => class.type_params(type_params),
                None => class,
            };
            let class = properties(decl).fold(class, Class::property);
            Declaration::Class(nested.fold(class, Class::nested))
        }
    }
}

fn function(function: &MapperFn) -> ExtensionFn {
    let body = match &function.body {
        MapperBody::Construct { target, args } => FnBody::Call {
            target: target.clone(),
            args: args
                .iter()
                .map(|arg| {
                    let value = KOTLIN_NAMING.safe_name(&arg.source);
                    NamedArg::new(&arg.name, conversion(&arg.conversion, &value, arg.nullable))
                })
                .collect(),
        },
        MapperBody::EnumWhen { arms } => {
            let when = arms.iter().fold(When::new("this"), |when, arm| {
                when.arm(
                    KOTLIN_NAMING.safe_path(&arm.from),
                    KOTLIN_NAMING.safe_path(&arm.to),
                )
            });
            FnBody::When(when)
        }
    };
    ExtensionFn::new(&function.receiver, &function.name, &function.returns, body)
        .type_params(&function.type_params)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mapgen_codegen::model::{
        Container, Conversion, DeclarationEditor, FileFactory, GeneratedParam, MapperArg,
        WhenArm,
    };
    use mapgen_ir::{ClassId, EnumEntry};

    use super::*;

    fn workspace() -> Workspace {
        let mut workspace = Workspace::new();
        let file =
            workspace.create_file(PathBuf::from("demo/OrderDto.kt"), "demo", FileRole::Entity);
        let _mappers = workspace.create_file(
            PathBuf::from("demo/OrderDtoMapper.kt"),
            "demo",
            FileRole::Mapper,
        );

        let mut order = GeneratedDecl::new("OrderDto", GeneratedKind::Data, ClassId(0));
        order.params = vec![
            GeneratedParam::new("id", "Long"),
            GeneratedParam::new("status", "StatusDto").mutable(true),
        ];
        let order = workspace
            .add_declaration(&Container::File(file), order)
            .unwrap();

        let mut status = GeneratedDecl::new("StatusDto", GeneratedKind::Enum, ClassId(1));
        status.entries = vec![EnumEntry::new("OPEN"), EnumEntry::new("in")];
        workspace
            .add_declaration(&Container::Class(order), status)
            .unwrap();

        workspace.add_reference(file, "java.time.Instant");
        workspace.add_function(
            file,
            MapperFn {
                source: ClassId(0),
                type_params: String::new(),
                receiver: "Order".to_string(),
                name: "mapToDto".to_string(),
                returns: "OrderDto".to_string(),
                body: MapperBody::Construct {
                    target: "OrderDto".to_string(),
                    args: vec![
                        MapperArg {
                            name: "id".to_string(),
                            source: "id".to_string(),
                            nullable: false,
                            conversion: Conversion::Identity,
                        },
                        MapperArg {
                            name: "status".to_string(),
                            source: "status".to_string(),
                            nullable: false,
                            conversion: Conversion::Mapper {
                                function: "mapToDto".to_string(),
                            },
                        },
                    ],
                },
            },
        );
        workspace.add_function(
            file,
            MapperFn {
                source: ClassId(1),
                type_params: String::new(),
                receiver: "Order.Status".to_string(),
                name: "mapToDto".to_string(),
                returns: "OrderDto.StatusDto".to_string(),
                body: MapperBody::EnumWhen {
                    arms: vec![
                        WhenArm {
                            from: "Order.Status.OPEN".to_string(),
                            to: "OrderDto.StatusDto.OPEN".to_string(),
                        },
                        WhenArm {
                            from: "Order.Status.in".to_string(),
                            to: "OrderDto.StatusDto.in".to_string(),
                        },
                    ],
                },
            },
        );
        workspace
    }

    #[test]
    fn test_render_entity_file() {
        let workspace = workspace();
        let source = render_file(&workspace.files()[0]);

        insta::assert_snapshot!(source, @r"
        package demo

        data class OrderDto(val id: Long, var status: StatusDto) {
            enum class StatusDto {
                OPEN,
                `in`,
            }
        }

        fun Order.mapToDto(): OrderDto = OrderDto(id = id, status = status.mapToDto())

        fun Order.Status.mapToDto(): OrderDto.StatusDto = when (this) {
            Order.Status.OPEN -> OrderDto.StatusDto.OPEN
            Order.Status.`in` -> OrderDto.StatusDto.`in`
        }
        ");
    }

    #[test]
    fn test_preview_skips_empty_files() {
        let workspace = workspace();
        let generator = Generator::new(&workspace);

        let files = generator.preview();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("demo/OrderDto.kt"));
        assert_eq!(files[0].category, FileCategory::Entity);
        assert_eq!(generator.language(), "kotlin");
        assert_eq!(generator.file_extension(), "kt");
    }

    #[test]
    fn test_generate_respects_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        let workspace = workspace();

        let result = Generator::new(&workspace).generate(temp.path()).unwrap();
        assert_eq!(result.created, vec![PathBuf::from("demo/OrderDto.kt")]);

        let err = Generator::new(&workspace)
            .generate(temp.path())
            .unwrap_err()
            .to_string();
        assert!(err.contains("refusing to overwrite"));

        let result = Generator::new(&workspace)
            .overwrite(true)
            .generate(temp.path())
            .unwrap();
        assert_eq!(result.replaced.len(), 1);
        assert_eq!(result.total(), 1);
    }
}
