//! Tokenizer for the subset of Kotlin the declaration parser needs.
//!
//! Comments and whitespace are dropped. String, character and numeric
//! literals become single opaque tokens so their content can never be
//! mistaken for structure.

use miette::SourceSpan;

use crate::{Result, SourceContext};

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword (backticked identifiers keep their backticks).
    Ident,
    /// String literal, including templates.
    Str,
    /// Character literal.
    Char,
    /// Numeric literal.
    Number,
    /// `->`
    Arrow,
    /// Any other single character.
    Punct(char),
    /// End of input.
    Eof,
}

/// A token with its byte range in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn span(&self) -> SourceSpan {
        (self.start, self.end - self.start).into()
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }
}

/// Split Kotlin source into tokens, ending with a single [`TokenKind::Eof`].
pub fn tokenize(ctx: &SourceContext) -> Result<Vec<Token>> {
    Lexer::new(ctx).run()
}

struct Lexer<'a> {
    ctx: &'a SourceContext,
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(ctx: &'a SourceContext) -> Self {
        Self {
            ctx,
            src: ctx.src(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        if self.src.starts_with("#!") {
            self.skip_line();
        }

        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                c if c.is_whitespace() => self.bump(),
                '/' if self.peek_at(1) == Some('/') => self.skip_line(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment()?,
                '"' => {
                    self.string()?;
                    self.push(TokenKind::Str, start);
                }
                '\'' => {
                    self.char_literal()?;
                    self.push(TokenKind::Char, start);
                }
                '`' => {
                    self.backtick_ident()?;
                    self.push(TokenKind::Ident, start);
                }
                c if c.is_ascii_digit() => {
                    self.number();
                    self.push(TokenKind::Number, start);
                }
                c if c.is_alphabetic() || c == '_' => {
                    while self
                        .peek()
                        .is_some_and(|c| c.is_alphanumeric() || c == '_')
                    {
                        self.bump();
                    }
                    self.push(TokenKind::Ident, start);
                }
                '-' if self.peek_at(1) == Some('>') => {
                    self.bump();
                    self.bump();
                    self.push(TokenKind::Arrow, start);
                }
                c => {
                    self.bump();
                    self.push(TokenKind::Punct(c), start);
                }
            }
        }

        let end = self.src.len();
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            start: end,
            end,
        });
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            start,
            end: self.pos,
        });
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Block comments nest in Kotlin.
    fn skip_block_comment(&mut self) -> Result<()> {
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some('/'), Some('*')) => {
                    depth += 1;
                    self.bump();
                    self.bump();
                }
                (Some('*'), Some('/')) => {
                    depth -= 1;
                    self.bump();
                    self.bump();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                (Some(_), _) => self.bump(),
                (None, _) => {
                    return Err(self
                        .ctx
                        .syntax_error("unterminated block comment", start..start + 2));
                }
            }
        }
    }

    fn string(&mut self) -> Result<()> {
        if self.src[self.pos..].starts_with("\"\"\"") {
            return self.raw_string();
        }
        let start = self.pos;
        self.bump();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    return Ok(());
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some('$') if self.peek_at(1) == Some('{') => self.template()?,
                Some('\n') | None => {
                    return Err(self.ctx.syntax_error_with_help(
                        "unterminated string literal",
                        start..start + 1,
                        "close the string with '\"' on the same line, or use a raw string (\"\"\")",
                    ));
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn raw_string(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 3;
        loop {
            if self.src[self.pos..].starts_with("\"\"\"") {
                self.pos += 3;
                // Extra quotes before the delimiter belong to the content.
                while self.peek() == Some('"') {
                    self.bump();
                }
                return Ok(());
            }
            match self.peek() {
                Some('$') if self.peek_at(1) == Some('{') => self.template()?,
                Some(_) => self.bump(),
                None => {
                    return Err(self
                        .ctx
                        .syntax_error("unterminated raw string literal", start..start + 3));
                }
            }
        }
    }

    /// `${ ... }` inside a string; may contain nested braces and strings.
    fn template(&mut self) -> Result<()> {
        let start = self.pos;
        self.bump();
        self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    depth -= 1;
                    self.bump();
                }
                Some('"') => self.string()?,
                Some('\'') => self.char_literal()?,
                Some(_) => self.bump(),
                None => {
                    return Err(self
                        .ctx
                        .syntax_error("unterminated string template", start..start + 2));
                }
            }
        }
        Ok(())
    }

    fn char_literal(&mut self) -> Result<()> {
        let start = self.pos;
        self.bump();
        loop {
            match self.peek() {
                Some('\'') => {
                    self.bump();
                    return Ok(());
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some('\n') | None => {
                    return Err(self
                        .ctx
                        .syntax_error("unterminated character literal", start..start + 1));
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn backtick_ident(&mut self) -> Result<()> {
        let start = self.pos;
        self.bump();
        loop {
            match self.peek() {
                Some('`') => {
                    self.bump();
                    return Ok(());
                }
                Some('\n') | None => {
                    return Err(self
                        .ctx
                        .syntax_error("unterminated quoted identifier", start..start + 1));
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn number(&mut self) {
        while let Some(c) = self.peek() {
            let fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if c.is_alphanumeric() || c == '_' || fraction {
                self.bump();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let ctx = SourceContext::new(src, "Test.kt");
        tokenize(&ctx).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(src: &str) -> Vec<String> {
        let ctx = SourceContext::new(src, "Test.kt");
        tokenize(&ctx)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| src[t.start..t.end].to_string())
            .collect()
    }

    #[test]
    fn test_tokenize_class_header() {
        assert_eq!(
            texts("data class User(val name: String?)"),
            vec!["data", "class", "User", "(", "val", "name", ":", "String", "?", ")"]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        let src = "// line\n/* block /* nested */ still */ val x = 1";
        assert_eq!(texts(src), vec!["val", "x", "=", "1"]);
    }

    #[test]
    fn test_string_with_template_is_one_token() {
        let src = r#"val s = "a ${ if (x) "}" else "{" } b""#;
        let kinds = kinds(src);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Punct('='),
                TokenKind::Str,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_raw_string() {
        let src = "val s = \"\"\"\n  {\"quoted\"}\n\"\"\"\nclass A";
        assert_eq!(texts(src).last().map(String::as_str), Some("A"));
    }

    #[test]
    fn test_arrow_and_char_literal() {
        assert_eq!(
            kinds("(Int) -> '}'"),
            vec![
                TokenKind::Punct('('),
                TokenKind::Ident,
                TokenKind::Punct(')'),
                TokenKind::Arrow,
                TokenKind::Char,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_backtick_identifier() {
        assert_eq!(texts("val `in`: Int"), vec!["val", "`in`", ":", "Int"]);
    }

    #[test]
    fn test_numbers_stop_at_range() {
        assert_eq!(texts("1..2"), vec!["1", ".", ".", "2"]);
        assert_eq!(texts("1.5f"), vec!["1.5f"]);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let ctx = SourceContext::new("val s = \"oops\nval t = 1", "Test.kt");
        assert!(tokenize(&ctx).is_err());
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        let ctx = SourceContext::new("/* never closed", "Test.kt");
        assert!(tokenize(&ctx).is_err());
    }
}
