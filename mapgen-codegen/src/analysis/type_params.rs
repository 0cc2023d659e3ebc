//! Declared type parameters, e.g. `<out T : Comparable<T>, R>`.

/// One declared type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeParam {
    name: String,
    /// Upper bound including the colon (e.g. ` : Comparable<T>`), if any.
    bound: Option<String>,
}

/// Parsed type-parameter list of a class declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParams {
    params: Vec<TypeParam>,
}

impl TypeParams {
    /// Parse the verbatim `<...>` text of a declaration.
    pub fn parse(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::default();
        };
        let inner = text
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim();
        let params = split_top_level(inner)
            .into_iter()
            .filter_map(|part| parse_param(&part))
            .collect();
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Type-argument list applying the parameters to the class, e.g. `<T, R>`.
    pub fn as_arguments(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.names().collect();
        format!("<{}>", names.join(", "))
    }

    /// Declaration for a function, e.g. `<T : Comparable<T>, R>`.
    ///
    /// Variance and `reified` are dropped since functions cannot declare them
    /// without being inline.
    pub fn as_function_declaration(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| match &p.bound {
                Some(bound) => format!("{} : {}", p.name, bound),
                None => p.name.clone(),
            })
            .collect();
        format!("<{}>", params.join(", "))
    }
}

fn parse_param(part: &str) -> Option<TypeParam> {
    let (head, bound) = match part.split_once(':') {
        Some((head, bound)) => (head, Some(bound.trim().to_string())),
        None => (part, None),
    };
    let name = head
        .split_whitespace()
        .filter(|w| !w.starts_with('@'))
        .rfind(|w| !matches!(*w, "out" | "in" | "reified"))?;
    Some(TypeParam {
        name: name.to_string(),
        bound,
    })
}

fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}
