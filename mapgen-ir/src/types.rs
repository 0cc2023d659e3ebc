//! Syntactic type references and Kotlin built-in scalar types.

use serde::Serialize;

/// A type as written in source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Dotted name as written (e.g., "List", "Outer.Inner", "java.util.UUID").
    pub name: String,
    /// Type arguments.
    pub args: Vec<TypeArg>,
    /// Whether the reference carries a trailing `?`.
    pub nullable: bool,
    /// Function types are kept verbatim and never resolved.
    pub function: bool,
    /// Verbatim source text of the whole reference.
    pub text: String,
}

impl TypeRef {
    /// Create a plain, non-generic reference.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            text: name.clone(),
            name,
            args: Vec::new(),
            nullable: false,
            function: false,
        }
    }

    /// Add a type argument.
    pub fn arg(mut self, ty: TypeRef) -> Self {
        self.args.push(TypeArg::Type {
            variance: Variance::Invariant,
            ty,
        });
        self.text = self.render();
        self
    }

    /// Mark the reference nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self.text = self.render();
        self
    }

    /// Last segment of the dotted name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Whether this reference has type arguments.
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// Render the reference from its parts (normalized spacing).
    pub fn render(&self) -> String {
        if self.function {
            return self.text.clone();
        }
        let mut out = self.name.clone();
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(TypeArg::render).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        if self.nullable {
            out.push('?');
        }
        out
    }
}

/// A single type argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeArg {
    /// Star projection (`*`).
    Star,
    /// A concrete argument with optional variance.
    Type { variance: Variance, ty: TypeRef },
}

impl TypeArg {
    /// The argument's type, if it is not a star projection.
    pub fn ty(&self) -> Option<&TypeRef> {
        match self {
            TypeArg::Star => None,
            TypeArg::Type { ty, .. } => Some(ty),
        }
    }

    fn render(&self) -> String {
        match self {
            TypeArg::Star => "*".to_string(),
            TypeArg::Type { variance, ty } => format!("{}{}", variance.prefix(), ty.render()),
        }
    }
}

/// Use-site variance of a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variance {
    Invariant,
    Out,
    In,
}

impl Variance {
    /// Source prefix including the trailing space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Variance::Invariant => "",
            Variance::Out => "out ",
            Variance::In => "in ",
        }
    }
}

/// Kotlin built-in scalar types, identified by fully-qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BasicType {
    Int,
    Long,
    Short,
    Byte,
    Float,
    Double,
    Char,
    Boolean,
    String,
    UInt,
    ULong,
    UShort,
    UByte,
    Any,
}

impl BasicType {
    pub const ALL: [BasicType; 14] = [
        BasicType::Int,
        BasicType::Long,
        BasicType::Short,
        BasicType::Byte,
        BasicType::Float,
        BasicType::Double,
        BasicType::Char,
        BasicType::Boolean,
        BasicType::String,
        BasicType::UInt,
        BasicType::ULong,
        BasicType::UShort,
        BasicType::UByte,
        BasicType::Any,
    ];

    /// Simple name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            BasicType::Int => "Int",
            BasicType::Long => "Long",
            BasicType::Short => "Short",
            BasicType::Byte => "Byte",
            BasicType::Float => "Float",
            BasicType::Double => "Double",
            BasicType::Char => "Char",
            BasicType::Boolean => "Boolean",
            BasicType::String => "String",
            BasicType::UInt => "UInt",
            BasicType::ULong => "ULong",
            BasicType::UShort => "UShort",
            BasicType::UByte => "UByte",
            BasicType::Any => "Any",
        }
    }

    /// Fully-qualified name (all basic types live in `kotlin`).
    pub fn fq_name(&self) -> String {
        format!("kotlin.{}", self.name())
    }

    /// Look up a basic type by fully-qualified name.
    pub fn from_fq_name(fq: &str) -> Option<Self> {
        let simple = fq.strip_prefix("kotlin.")?;
        Self::ALL.into_iter().find(|b| b.name() == simple)
    }
}
