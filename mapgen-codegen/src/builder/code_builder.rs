//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Indentation-aware text buffer that AST nodes are emitted into.
///
/// # Example
///
/// ```
/// use mapgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::kotlin();
/// builder
///     .push_line("enum class Color {")
///     .push_indent()
///     .push_line("RED,")
///     .push_line("GREEN,")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "enum class Color {\n    RED,\n    GREEN,\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a builder with 4-space indentation.
    pub fn kotlin() -> Self {
        Self::new(Indent::KOTLIN)
    }

    /// Add a line with current indentation. Empty lines carry no indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::kotlin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_line("val x = 1");
        assert_eq!(builder.build(), "val x = 1\n");
    }

    #[test]
    fn test_empty_line_has_no_trailing_whitespace() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_indent().push_line("").push_line("x");
        assert_eq!(builder.build(), "\n    x\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_dedent().push_line("x").push_raw("y");
        assert_eq!(builder.build(), "x\ny");
    }

    #[test]
    fn test_emit_nested_lines() {
        struct Outer;
        impl Renderable for Outer {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::line("data class OuterModel(val x: Int) {"),
                    CodeFragment::indent(vec![CodeFragment::line(
                        "data class InnerModel(val y: Int)",
                    )]),
                    CodeFragment::line("}"),
                ]
            }
        }

        let mut builder = CodeBuilder::kotlin();
        builder.emit(&Outer);
        assert_eq!(
            builder.build(),
            "data class OuterModel(val x: Int) {\n    data class InnerModel(val y: Int)\n}\n"
        );
    }

    #[test]
    fn test_lines_keep_their_own_indentation() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_indent();
        builder.apply_fragment(CodeFragment::lines(["when (this) {", "    A -> B", "}"]));
        builder.push_dedent().push_blank();
        assert_eq!(builder.build(), "    when (this) {\n        A -> B\n    }\n\n");
    }
}
