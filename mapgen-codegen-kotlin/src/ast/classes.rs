//! Kotlin class and enum class builders.

use mapgen_codegen::builder::{CodeFragment, Renderable};

use super::MAX_LINE_WIDTH;
use crate::KOTLIN_NAMING;

/// A primary-constructor property.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub ty: String,
    pub mutable: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            mutable: false,
        }
    }

    /// Declare the property with `var`.
    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    fn format(&self) -> String {
        let keyword = if self.mutable { "var" } else { "val" };
        format!(
            "{} {}: {}",
            keyword,
            KOTLIN_NAMING.safe_name(&self.name),
            self.ty
        )
    }
}

/// A declaration that can appear at top level or nested in a class body.
#[derive(Debug, Clone)]
pub enum Declaration {
    Class(Class),
    Enum(EnumClass),
}

impl Renderable for Declaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Declaration::Class(class) => class.to_fragments(),
            Declaration::Enum(enum_class) => enum_class.to_fragments(),
        }
    }
}

/// Builder for Kotlin classes with a primary constructor.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    is_data: bool,
    type_params: Option<String>,
    properties: Vec<Property>,
    nested: Vec<Declaration>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_data: false,
            type_params: None,
            properties: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Create a `data class`.
    pub fn data(name: impl Into<String>) -> Self {
        Self {
            is_data: true,
            ..Self::new(name)
        }
    }

    /// Set the type parameter list, including angle brackets.
    pub fn type_params(mut self, type_params: impl Into<String>) -> Self {
        self.type_params = Some(type_params.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn nested(mut self, declaration: Declaration) -> Self {
        self.nested.push(declaration);
        self
    }

    fn keyword(&self) -> &'static str {
        if self.is_data { "data class" } else { "class" }
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = format!(
            "{} {}{}",
            self.keyword(),
            KOTLIN_NAMING.safe_name(&self.name),
            self.type_params.as_deref().unwrap_or_default()
        );
        with_body(
            constructor(header, &self.properties, !self.nested.is_empty()),
            members(&self.nested),
        )
    }
}

/// An enum constant, with optional constructor arguments.
#[derive(Debug, Clone)]
pub struct EnumConstant {
    pub name: String,
    /// Argument list including parentheses, e.g. `(1, "a")`.
    pub args: Option<String>,
}

impl EnumConstant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }

    pub fn args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }
}

/// Builder for Kotlin enum classes.
#[derive(Debug, Clone)]
pub struct EnumClass {
    name: String,
    properties: Vec<Property>,
    constants: Vec<EnumConstant>,
    nested: Vec<Declaration>,
}

impl EnumClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            constants: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn constant(mut self, constant: EnumConstant) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn nested(mut self, declaration: Declaration) -> Self {
        self.nested.push(declaration);
        self
    }

    fn constant_fragments(&self) -> Vec<CodeFragment> {
        let last = self.constants.len().saturating_sub(1);
        let mut fragments: Vec<CodeFragment> = self
            .constants
            .iter()
            .enumerate()
            .map(|(i, constant)| {
                // Members after the entries need a terminating semicolon.
                let terminator = if i == last && !self.nested.is_empty() {
                    ";"
                } else {
                    ","
                };
                CodeFragment::line(format!(
                    "{}{}{}",
                    KOTLIN_NAMING.safe_name(&constant.name),
                    constant.args.as_deref().unwrap_or_default(),
                    terminator
                ))
            })
            .collect();

        if self.constants.is_empty() && !self.nested.is_empty() {
            fragments.push(CodeFragment::line(";"));
        }
        if !self.nested.is_empty() {
            fragments.push(CodeFragment::blank());
            fragments.extend(members(&self.nested));
        }
        fragments
    }
}

impl Renderable for EnumClass {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = format!("enum class {}", KOTLIN_NAMING.safe_name(&self.name));
        let has_body = !self.constants.is_empty() || !self.nested.is_empty();
        with_body(
            constructor(header, &self.properties, has_body),
            self.constant_fragments(),
        )
    }
}

/// Header plus primary constructor. The last fragment is the line that
/// opens the body when `has_body` is set.
fn constructor(header: String, properties: &[Property], has_body: bool) -> Vec<CodeFragment> {
    let open = if has_body { " {" } else { "" };
    if properties.is_empty() {
        return vec![CodeFragment::line(format!("{header}{open}"))];
    }

    let params: Vec<String> = properties.iter().map(Property::format).collect();
    let single = format!("{}({}){}", header, params.join(", "), open);
    if single.len() <= MAX_LINE_WIDTH {
        return vec![CodeFragment::line(single)];
    }

    vec![
        CodeFragment::line(format!("{header}(")),
        CodeFragment::indent(
            params
                .into_iter()
                .map(|p| CodeFragment::line(format!("{p},")))
                .collect(),
        ),
        CodeFragment::line(format!("){open}")),
    ]
}

/// Append an indented body and the closing brace, if there is a body.
fn with_body(mut header: Vec<CodeFragment>, body: Vec<CodeFragment>) -> Vec<CodeFragment> {
    if !body.is_empty() {
        header.push(CodeFragment::indent(body));
        header.push(CodeFragment::line("}"));
    }
    header
}

/// Declarations separated by blank lines.
fn members(declarations: &[Declaration]) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            fragments.push(CodeFragment::blank());
        }
        fragments.extend(declaration.to_fragments());
    }
    fragments
}

#[cfg(test)]
mod tests {
    use mapgen_codegen::builder::CodeBuilder;

    use super::*;

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::kotlin();
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_single_line_data_class() {
        let class = Class::data("AddressDto")
            .property(Property::new("city", "String"))
            .property(Property::new("zip", "Int"));

        assert_eq!(
            render(&class),
            "data class AddressDto(val city: String, val zip: Int)\n"
        );
    }

    #[test]
    fn test_long_data_class_breaks_lines() {
        let class = Class::data("CustomerProfileModel")
            .type_params("<T>")
            .property(Property::new("firstName", "String"))
            .property(Property::new("lastName", "String").mutable(true))
            .property(Property::new("emailAddress", "String?"))
            .property(Property::new("payload", "T"));

        assert_eq!(
            render(&class),
            "data class CustomerProfileModel<T>(\n    val firstName: String,\n    var lastName: String,\n    val emailAddress: String?,\n    val payload: T,\n)\n"
        );
    }

    #[test]
    fn test_nested_declarations() {
        let class = Class::data("OuterModel")
            .property(Property::new("in", "Int"))
            .nested(Declaration::Class(
                Class::data("InnerModel").property(Property::new("x", "Int")),
            ))
            .nested(Declaration::Enum(
                EnumClass::new("KindModel").constant(EnumConstant::new("A")),
            ));

        assert_eq!(
            render(&class),
            "data class OuterModel(val `in`: Int) {\n    data class InnerModel(val x: Int)\n\n    enum class KindModel {\n        A,\n    }\n}\n"
        );
    }

    #[test]
    fn test_plain_class_without_properties() {
        assert_eq!(render(&Class::new("EmptyModel")), "class EmptyModel\n");
    }

    #[test]
    fn test_enum_with_arguments_and_members() {
        let enum_class = EnumClass::new("LevelModel")
            .property(Property::new("code", "Int"))
            .constant(EnumConstant::new("LOW").args("(1)"))
            .constant(EnumConstant::new("HIGH").args("(2)"))
            .nested(Declaration::Class(Class::new("MarkerModel")));

        assert_eq!(
            render(&enum_class),
            "enum class LevelModel(val code: Int) {\n    LOW(1),\n    HIGH(2);\n\n    class MarkerModel\n}\n"
        );
    }

    #[test]
    fn test_empty_enum() {
        assert_eq!(render(&EnumClass::new("NoneModel")), "enum class NoneModel\n");
    }
}
