//! Conversion expressions.
//!
//! Lambdas introduced while converting nested generic values use `it` at
//! the outermost level and `it1`, `it2`, ... below it, so inner lambdas never
//! shadow outer ones. Map entries and pairs are destructured into
//! `(key, value)` and `(first, second)` with the same depth suffix.

use std::fmt;

use mapgen_codegen::model::{Conversion, WhenArm};

/// Expression used where mapgen cannot produce a conversion.
pub const PLACEHOLDER_EXPR: &str = "TODO(\"Implement manually\")";

/// A rendered expression. Continuation lines carry their indentation
/// relative to the first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    lines: Vec<String>,
}

impl Expression {
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// An exhaustive `when` over enum entries.
#[derive(Debug, Clone)]
pub struct When {
    subject: String,
    arms: Vec<(String, String)>,
    null_arm: bool,
}

impl When {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            arms: Vec::new(),
            null_arm: false,
        }
    }

    pub fn arm(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.arms.push((from.into(), to.into()));
        self
    }

    pub fn arms<'a>(self, arms: impl IntoIterator<Item = &'a WhenArm>) -> Self {
        arms.into_iter()
            .fold(self, |when, arm| when.arm(arm.from.as_str(), arm.to.as_str()))
    }

    /// Add `null -> null` for a nullable subject.
    pub fn null_arm(mut self, null_arm: bool) -> Self {
        self.null_arm = null_arm;
        self
    }

    pub fn to_expression(&self) -> Expression {
        let mut lines = vec![format!("when ({}) {{", self.subject)];
        lines.extend(
            self.arms
                .iter()
                .map(|(from, to)| format!("    {from} -> {to}")),
        );
        if self.null_arm {
            lines.push("    null -> null".to_string());
        }
        lines.push("}".to_string());
        Expression { lines }
    }
}

/// Render `conversion` applied to the property `value`.
pub fn conversion(conversion: &Conversion, value: &str, nullable: bool) -> Expression {
    match conversion {
        Conversion::EnumWhen { arms } => When::new(value)
            .arms(arms)
            .null_arm(nullable)
            .to_expression(),
        other => Expression::inline(inline(other, value, nullable, 0)),
    }
}

fn inline(conversion: &Conversion, value: &str, nullable: bool, depth: usize) -> String {
    let call = if nullable { "?." } else { "." };
    match conversion {
        Conversion::Identity => value.to_string(),
        Conversion::Placeholder => PLACEHOLDER_EXPR.to_string(),
        Conversion::Mapper { function } => format!("{value}{call}{function}()"),
        Conversion::EnumWhen { arms } => {
            let mut branches: Vec<String> = arms
                .iter()
                .map(|arm| format!("{} -> {}", arm.from, arm.to))
                .collect();
            if nullable {
                branches.push("null -> null".to_string());
            }
            format!("when ({value}) {{ {} }}", branches.join("; "))
        }
        Conversion::Collection {
            element,
            element_nullable,
            collect,
        } => {
            let (param, var) = if depth == 0 {
                (String::new(), "it".to_string())
            } else {
                (format!("it{depth} -> "), format!("it{depth}"))
            };
            let body = inline(element, &var, *element_nullable, depth + 1);
            let mut text = format!("{value}{call}map {{ {param}{body} }}");
            if let Some(collect) = collect {
                text.push_str(call);
                text.push_str(collect);
            }
            text
        }
        Conversion::Map {
            builder,
            key,
            key_nullable,
            value: entry_value,
            value_nullable,
        } => {
            let (k, v) = (named("key", depth), named("value", depth));
            format!(
                "{value}{call}entries{call}associateTo({builder}()) {{ ({k}, {v}) -> {} to {} }}",
                inline(key, &k, *key_nullable, depth + 1),
                inline(entry_value, &v, *value_nullable, depth + 1),
            )
        }
        Conversion::Pair {
            first,
            first_nullable,
            second,
            second_nullable,
        } => {
            let (a, b) = (named("first", depth), named("second", depth));
            format!(
                "{value}{call}let {{ ({a}, {b}) -> {} to {} }}",
                inline(first, &a, *first_nullable, depth + 1),
                inline(second, &b, *second_nullable, depth + 1),
            )
        }
    }
}

fn named(base: &str, depth: usize) -> String {
    if depth == 0 {
        base.to_string()
    } else {
        format!("{base}{depth}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> Conversion {
        Conversion::Mapper {
            function: "mapToDto".to_string(),
        }
    }

    fn render(c: &Conversion, value: &str, nullable: bool) -> String {
        conversion(c, value, nullable).to_string()
    }

    #[test]
    fn test_simple_conversions() {
        assert_eq!(render(&Conversion::Identity, "city", true), "city");
        assert_eq!(render(&mapper(), "address", false), "address.mapToDto()");
        assert_eq!(render(&mapper(), "address", true), "address?.mapToDto()");
        assert_eq!(
            render(&Conversion::Placeholder, "x", false),
            "TODO(\"Implement manually\")"
        );
    }

    #[test]
    fn test_collections() {
        let list = Conversion::collection(mapper(), false, None);
        assert_eq!(render(&list, "members", false), "members.map { it.mapToDto() }");

        let set = Conversion::collection(mapper(), true, Some("toSet()"));
        assert_eq!(
            render(&set, "tags", true),
            "tags?.map { it?.mapToDto() }?.toSet()"
        );

        let inner = Conversion::collection(mapper(), false, None);
        let nested = Conversion::collection(inner, false, None);
        assert_eq!(
            render(&nested, "grid", false),
            "grid.map { it.map { it1 -> it1.mapToDto() } }"
        );
    }

    #[test]
    fn test_maps_and_pairs() {
        let map = Conversion::map(
            "HashMap<Long, UserDto>".to_string(),
            (Conversion::Identity, false),
            (mapper(), false),
        );
        assert_eq!(
            render(&map, "byId", false),
            "byId.entries.associateTo(HashMap<Long, UserDto>()) { (key, value) -> key to value.mapToDto() }"
        );

        let pair = Conversion::pair((mapper(), false), (Conversion::Identity, false));
        assert_eq!(
            render(&pair, "pair", true),
            "pair?.let { (first, second) -> first.mapToDto() to second }"
        );

        let list_of_pairs = Conversion::collection(pair, false, None);
        assert_eq!(
            render(&list_of_pairs, "pairs", false),
            "pairs.map { it.let { (first1, second1) -> first1.mapToDto() to second1 } }"
        );
    }

    #[test]
    fn test_enum_when() {
        let when = Conversion::EnumWhen {
            arms: vec![
                WhenArm {
                    from: "Size.S".to_string(),
                    to: "SizeDto.S".to_string(),
                },
                WhenArm {
                    from: "Size.L".to_string(),
                    to: "SizeDto.L".to_string(),
                },
            ],
        };

        let expression = conversion(&when, "size", true);
        assert!(expression.is_multiline());
        assert_eq!(
            expression.to_string(),
            "when (size) {\n    Size.S -> SizeDto.S\n    Size.L -> SizeDto.L\n    null -> null\n}"
        );
    }
}
