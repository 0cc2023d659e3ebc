//! KotlinFile abstraction for structured Kotlin file generation.
//!
//! A file is a package directive, sorted imports and body items separated
//! by blank lines.

use mapgen_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::local_name,
};

use crate::KOTLIN_NAMING;

/// A structured representation of a Kotlin file.
///
/// # Example
///
/// ```ignore
/// let source = KotlinFile::new("com.example")
///     .imports(vec!["java.time.Instant".to_string()])
///     .add(user_model)
///     .add(user_mapper)
///     .prune_imports()
///     .render();
/// ```
#[derive(Debug, Default)]
pub struct KotlinFile {
    package: String,
    /// Directive texts without the `import` keyword.
    imports: Vec<String>,
    body: Vec<Vec<CodeFragment>>,
}

impl KotlinFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Add import directives (`a.b.C`, `a.b.C as D` or `a.b.*`).
    pub fn imports(mut self, directives: impl IntoIterator<Item = String>) -> Self {
        self.imports.extend(directives);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Drop imports whose name never appears in the body. Star imports are
    /// always kept.
    pub fn prune_imports(mut self) -> Self {
        let body = self.body_text();
        self.imports.retain(|directive| {
            let symbol = directive
                .rsplit_once('.')
                .map_or(directive.as_str(), |(_, symbol)| symbol);
            local_name(symbol).is_none_or(|name| mentions(&body, name))
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Render body items only.
    pub fn body_text(&self) -> String {
        let mut builder = CodeBuilder::kotlin();
        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }
        builder.build()
    }

    /// Render the whole file.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::kotlin();

        if !self.package.is_empty() {
            builder.push_line(&format!("package {}", KOTLIN_NAMING.safe_path(&self.package)));
        }

        let mut imports = self.imports.clone();
        imports.sort();
        imports.dedup();
        if !imports.is_empty() {
            if !self.package.is_empty() {
                builder.push_blank();
            }
            for directive in &imports {
                builder.push_line(&format!("import {directive}"));
            }
        }

        let body = self.body_text();
        if !body.is_empty() {
            if !self.package.is_empty() || !imports.is_empty() {
                builder.push_blank();
            }
            builder.push_raw(&body);
        }

        builder.build()
    }
}

/// Whether `name` occurs in `text` as a whole identifier that is not a
/// member access (`x.name`).
fn mentions(text: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    text.match_indices(name).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + name.len()..].chars().next();
        !before.is_some_and(|c| is_ident(c) || c == '.') && !after.is_some_and(is_ident)
    })
}
