//! Kotlin extension function builder.

use mapgen_codegen::builder::{CodeFragment, Renderable};

use super::{Expression, MAX_LINE_WIDTH, When};
use crate::KOTLIN_NAMING;

/// A named argument, `name = value`.
#[derive(Debug, Clone)]
pub struct NamedArg {
    pub name: String,
    pub value: Expression,
}

impl NamedArg {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = self.value.lines().to_vec();
        if let Some(first) = lines.first_mut() {
            *first = format!("{} = {}", KOTLIN_NAMING.safe_name(&self.name), first);
        }
        lines
    }
}

/// Expression body of an extension function.
#[derive(Debug, Clone)]
pub enum FnBody {
    /// `Target(name = value, ...)`
    Call { target: String, args: Vec<NamedArg> },
    When(When),
}

/// An expression-bodied extension function:
/// `fun <T> Receiver.name(): Returns = body`.
#[derive(Debug, Clone)]
pub struct ExtensionFn {
    type_params: String,
    receiver: String,
    name: String,
    returns: String,
    body: FnBody,
}

impl ExtensionFn {
    pub fn new(
        receiver: impl Into<String>,
        name: impl Into<String>,
        returns: impl Into<String>,
        body: FnBody,
    ) -> Self {
        Self {
            type_params: String::new(),
            receiver: receiver.into(),
            name: name.into(),
            returns: returns.into(),
            body,
        }
    }

    /// Set the type parameter declaration, including angle brackets.
    pub fn type_params(mut self, type_params: impl Into<String>) -> Self {
        self.type_params = type_params.into();
        self
    }

    fn signature(&self) -> String {
        let type_params = if self.type_params.is_empty() {
            String::new()
        } else {
            format!("{} ", self.type_params)
        };
        format!(
            "fun {}{}.{}(): {} = ",
            type_params, self.receiver, self.name, self.returns
        )
    }
}

impl Renderable for ExtensionFn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let signature = self.signature();
        match &self.body {
            FnBody::Call { target, args } => call(&signature, target, args),
            FnBody::When(when) => {
                let expression = when.to_expression();
                let mut lines = expression.lines().iter();
                let first = lines.next().map(String::as_str).unwrap_or_default();
                let mut fragments = vec![CodeFragment::line(format!("{signature}{first}"))];
                fragments.extend(lines.map(|line| CodeFragment::line(line.as_str())));
                fragments
            }
        }
    }
}

fn call(signature: &str, target: &str, args: &[NamedArg]) -> Vec<CodeFragment> {
    if !args.iter().any(|arg| arg.value.is_multiline()) {
        let joined: Vec<String> = args.iter().map(|arg| arg.lines().join("")).collect();
        let single = format!("{}{}({})", signature, target, joined.join(", "));
        if args.is_empty() || single.len() <= MAX_LINE_WIDTH {
            return vec![CodeFragment::line(single)];
        }
    }

    let body = args
        .iter()
        .flat_map(|arg| {
            let mut lines = arg.lines();
            if let Some(last) = lines.last_mut() {
                last.push(',');
            }
            lines
        })
        .collect::<Vec<_>>();

    vec![
        CodeFragment::line(format!("{signature}{target}(")),
        CodeFragment::indent(vec![CodeFragment::lines(body)]),
        CodeFragment::line(")"),
    ]
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

    fn arg(name: &str, value: &str) -> NamedArg {
        NamedArg::new(name, Expression::inline(value))
    }

    #[test]
    fn test_single_line_mapper() {
        let function = ExtensionFn::new(
            "Address",
            "mapToDto",
            "AddressDto",
            FnBody::Call {
                target: "AddressDto".to_string(),
                args: vec![arg("city", "city"), arg("zip", "zip")],
            },
        );

        assert_eq!(
            render(&function),
            "fun Address.mapToDto(): AddressDto = AddressDto(city = city, zip = zip)\n"
        );
    }

    #[test]
    fn test_long_mapper_breaks_lines() {
        let function = ExtensionFn::new(
            "User",
            "mapToDto",
            "UserDto",
            FnBody::Call {
                target: "UserDto".to_string(),
                args: vec![
                    arg("name", "name"),
                    arg("addressDto", "address.mapToDto()"),
                    arg("members", "members.map { it.mapToDto() }"),
                ],
            },
        );

        assert_eq!(
            render(&function),
            "fun User.mapToDto(): UserDto = UserDto(\n    name = name,\n    addressDto = address.mapToDto(),\n    members = members.map { it.mapToDto() },\n)\n"
        );
    }

    #[test]
    fn test_multiline_argument_forces_layout() {
        let when = When::new("size").arm("Size.S", "SizeDto.S").to_expression();
        let function = ExtensionFn::new(
            "Box<T>",
            "mapToDto",
            "BoxDto<T>",
            FnBody::Call {
                target: "BoxDto".to_string(),
                args: vec![NamedArg::new("size", when), arg("in", "`in`")],
            },
        )
        .type_params("<T>");

        assert_eq!(
            render(&function),
            "fun <T> Box<T>.mapToDto(): BoxDto<T> = BoxDto(\n    size = when (size) {\n        Size.S -> SizeDto.S\n    },\n    `in` = `in`,\n)\n"
        );
    }

    #[test]
    fn test_no_arguments() {
        let function = ExtensionFn::new(
            "Empty",
            "mapToModel",
            "EmptyModel",
            FnBody::Call {
                target: "EmptyModel".to_string(),
                args: Vec::new(),
            },
        );
        assert_eq!(
            render(&function),
            "fun Empty.mapToModel(): EmptyModel = EmptyModel()\n"
        );
    }

    #[test]
    fn test_enum_mapper() {
        let function = ExtensionFn::new(
            "Kind",
            "mapToDto",
            "KindDto",
            FnBody::When(
                When::new("this")
                    .arm("Kind.A", "KindDto.A")
                    .arm("Kind.B", "KindDto.B"),
            ),
        );

        assert_eq!(
            render(&function),
            "fun Kind.mapToDto(): KindDto = when (this) {\n    Kind.A -> KindDto.A\n    Kind.B -> KindDto.B\n}\n"
        );
    }
}
