//! Kotlin declaration parser.
//!
//! Only the shape of class-like declarations is extracted: package, imports,
//! class headers, primary-constructor parameters, enum entries and nested
//! classes. Function bodies, properties and initializer expressions are
//! skipped by bracket matching.

use std::path::PathBuf;

use mapgen_core::strip_backticks;
use mapgen_ir::{
    ClassDecl, ClassId, ClassKind, EnumEntry, Field, FileId, Import, Project, TypeArg, TypeRef,
    Variance, Visibility,
};

use crate::{
    Result, SourceContext,
    lexer::{Token, TokenKind, tokenize},
};

/// Soft keywords that may precede a declaration.
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "internal",
    "protected",
    "open",
    "final",
    "abstract",
    "sealed",
    "data",
    "enum",
    "annotation",
    "value",
    "inline",
    "inner",
    "companion",
    "override",
    "lateinit",
    "const",
    "external",
    "expect",
    "actual",
    "suspend",
    "tailrec",
    "operator",
    "infix",
    "vararg",
    "noinline",
    "crossinline",
    "reified",
];

/// Keywords that always start a new member.
const DECLARATION_KEYWORDS: &[&str] = &[
    "class",
    "interface",
    "object",
    "fun",
    "val",
    "var",
    "typealias",
    "init",
    "constructor",
];

/// A parsed source file, before ids are assigned.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub package: String,
    pub imports: Vec<Import>,
    pub classes: Vec<ParsedClass>,
}

impl ParsedFile {
    /// Add the file and all of its classes to `project`.
    pub fn register(self, project: &mut Project, path: impl Into<PathBuf>) -> FileId {
        let file = project.add_file(path, self.package, self.imports);
        for class in self.classes {
            class.register(project, file, None);
        }
        file
    }
}

/// A parsed class-like declaration.
#[derive(Debug, Clone)]
pub struct ParsedClass {
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Option<String>,
    pub fields: Vec<Field>,
    pub entries: Vec<EnumEntry>,
    pub nested: Vec<ParsedClass>,
    pub offset: usize,
}

impl ParsedClass {
    fn register(self, project: &mut Project, file: FileId, parent: Option<ClassId>) -> ClassId {
        let mut decl = ClassDecl::new(self.name, self.kind, file);
        decl.parent = parent;
        decl.type_params = self.type_params;
        decl.fields = self.fields;
        decl.entries = self.entries;
        decl.offset = self.offset;
        let id = project.add_class(decl);
        for nested in self.nested {
            nested.register(project, file, Some(id));
        }
        id
    }
}

/// Parse the declarations of one Kotlin file.
pub fn parse(ctx: &SourceContext) -> Result<ParsedFile> {
    let tokens = tokenize(ctx)?;
    Parser {
        ctx,
        src: ctx.src(),
        tokens,
        pos: 0,
    }
    .file()
}

struct Parser<'a> {
    ctx: &'a SourceContext,
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn file(&mut self) -> Result<ParsedFile> {
        while self.peek().is_punct('@') {
            self.annotation()?;
        }

        let package = if self.at_ident("package") {
            self.bump();
            let package = self.dotted_name("package name")?;
            self.eat_punct(';');
            package
        } else {
            String::new()
        };

        let mut imports = Vec::new();
        while self.at_ident("import") {
            self.bump();
            imports.push(self.import()?);
            self.eat_punct(';');
        }

        let classes = self.members()?;
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            return Err(self.ctx.syntax_error("unexpected '}'", tok.span()));
        }

        Ok(ParsedFile {
            package,
            imports,
            classes,
        })
    }

    // -- token access -----------------------------------------------------

    fn peek(&self) -> Token {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn text(&self, tok: Token) -> &'a str {
        &self.src[tok.start..tok.end]
    }

    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].end
        }
    }

    fn ident_at(&self, n: usize) -> Option<&'a str> {
        let tok = self.peek_at(n);
        (tok.kind == TokenKind::Ident).then(|| self.text(tok))
    }

    fn at_ident(&self, word: &str) -> bool {
        self.ident_at(0) == Some(word)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek().is_punct(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char, help: &str) -> Result<()> {
        if self.eat_punct(c) {
            return Ok(());
        }
        let tok = self.peek();
        Err(self
            .ctx
            .syntax_error_with_help(format!("expected '{}'", c), tok.span(), help))
    }

    fn expect_ident(&mut self, what: &str) -> Result<&'a str> {
        let tok = self.peek();
        if tok.kind == TokenKind::Ident {
            self.bump();
            Ok(self.text(tok))
        } else {
            Err(self.ctx.syntax_error(format!("expected {}", what), tok.span()))
        }
    }

    /// Whether the next token is a modifier keyword applied to what follows.
    fn at_modifier(&self) -> bool {
        match self.ident_at(0) {
            Some(word) if MODIFIERS.contains(&word) => {
                let next = self.peek_at(1);
                next.kind == TokenKind::Ident || next.is_punct('@')
            }
            _ => false,
        }
    }

    // -- header -----------------------------------------------------------

    fn dotted_name(&mut self, what: &str) -> Result<String> {
        let mut name = self.expect_ident(what)?.to_string();
        while self.peek().is_punct('.') && self.peek_at(1).kind == TokenKind::Ident {
            self.bump();
            let segment = self.bump();
            name.push('.');
            name.push_str(self.text(segment));
        }
        Ok(name)
    }

    fn import(&mut self) -> Result<Import> {
        let path = self.dotted_name("import path")?;
        if self.peek().is_punct('.') && self.peek_at(1).is_punct('*') {
            self.bump();
            self.bump();
            return Ok(Import::star(path));
        }
        let mut import = Import::symbol(path);
        if self.at_ident("as") {
            self.bump();
            import.alias = Some(self.expect_ident("import alias")?.to_string());
        }
        Ok(import)
    }

    /// Parse an annotation and return its short name.
    fn annotation(&mut self) -> Result<Option<String>> {
        self.bump();
        if self.peek().is_punct('[') {
            self.skip_balanced()?;
            return Ok(None);
        }
        // Use-site target such as `@field:Json` or `@file:JvmName`.
        if self.peek().kind == TokenKind::Ident
            && self.peek_at(1).is_punct(':')
            && !self.peek_at(2).is_punct(':')
        {
            self.bump();
            self.bump();
            if self.peek().is_punct('[') {
                self.skip_balanced()?;
                return Ok(None);
            }
        }
        let name = self.dotted_name("annotation name")?;
        if self.peek().is_punct('(') && self.peek().start == self.prev_end() {
            self.skip_balanced()?;
        }
        let short = name.rsplit('.').next().unwrap_or(&name).to_string();
        Ok(Some(short))
    }

    // -- members ----------------------------------------------------------

    /// Parse members until `}` or end of input (neither is consumed).
    fn members(&mut self) -> Result<Vec<ParsedClass>> {
        let mut classes = Vec::new();
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof | TokenKind::Punct('}') => break,
                TokenKind::Punct(';') => {
                    self.bump();
                }
                _ => {
                    let start = self.pos;
                    match self.class_declaration()? {
                        Some(class) => classes.push(class),
                        None => {
                            self.pos = start;
                            self.skip_member()?;
                        }
                    }
                }
            }
        }
        Ok(classes)
    }

    /// Skip one non-class member, stopping before the next declaration start.
    fn skip_member(&mut self) -> Result<()> {
        self.skip_one()?;
        self.skip_until_declaration(false)
    }

    /// Skip tokens at bracket depth zero until a declaration start.
    fn skip_until_declaration(&mut self, stop_at_brace: bool) -> Result<()> {
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof | TokenKind::Punct('}') | TokenKind::Punct(';') => return Ok(()),
                TokenKind::Punct('{') if stop_at_brace => return Ok(()),
                TokenKind::Punct('@') => return Ok(()),
                TokenKind::Ident if self.starts_declaration() => return Ok(()),
                _ => self.skip_one()?,
            }
        }
    }

    fn starts_declaration(&self) -> bool {
        let Some(word) = self.ident_at(0) else {
            return false;
        };
        if word == "class" && self.pos > 0 && self.tokens[self.pos - 1].is_punct(':') {
            // `Foo::class`
            return false;
        }
        DECLARATION_KEYWORDS.contains(&word) || (MODIFIERS.contains(&word) && self.at_modifier())
    }

    /// Skip a single token, or a whole bracketed group when at an opener.
    fn skip_one(&mut self) -> Result<()> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Punct('(') | TokenKind::Punct('[') | TokenKind::Punct('{') => {
                self.skip_balanced()
            }
            TokenKind::Punct(c @ (')' | ']')) => Err(self
                .ctx
                .syntax_error(format!("unexpected '{}'", c), tok.span())),
            _ => {
                self.bump();
                Ok(())
            }
        }
    }

    /// Skip a bracketed group starting at the current opener.
    fn skip_balanced(&mut self) -> Result<()> {
        let open = self.bump();
        let mut stack = vec![open];
        while let Some(top) = stack.last().copied() {
            let tok = self.bump();
            match tok.kind {
                TokenKind::Punct('(') | TokenKind::Punct('[') | TokenKind::Punct('{') => {
                    stack.push(tok)
                }
                TokenKind::Punct(c @ (')' | ']' | '}')) => {
                    let expected = closer(top);
                    if c != expected {
                        return Err(self.ctx.syntax_error_with_help(
                            format!("mismatched '{}'", c),
                            tok.span(),
                            format!("expected '{}' to close the group opened here", expected),
                        ));
                    }
                    stack.pop();
                }
                TokenKind::Eof => {
                    return Err(self.ctx.syntax_error(
                        format!("unclosed '{}'", self.text(top)),
                        top.span(),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn capture_balanced(&mut self) -> Result<String> {
        let start = self.peek().start;
        self.skip_balanced()?;
        Ok(self.src[start..self.prev_end()].to_string())
    }

    // -- classes ----------------------------------------------------------

    /// Try to parse a class-like declaration; `None` when the member is something else.
    fn class_declaration(&mut self) -> Result<Option<ParsedClass>> {
        let mut modifiers = Vec::new();
        loop {
            if self.peek().is_punct('@') {
                self.annotation()?;
            } else if self.at_modifier() {
                let tok = self.bump();
                modifiers.push(self.text(tok));
            } else if self.at_ident("fun") && self.ident_at(1) == Some("interface") {
                self.bump();
            } else {
                break;
            }
        }

        let kind = match self.ident_at(0) {
            Some("class") => {
                if modifiers.contains(&"data") {
                    ClassKind::Data
                } else if modifiers.contains(&"enum") {
                    ClassKind::Enum
                } else if modifiers.contains(&"annotation") {
                    ClassKind::Annotation
                } else if modifiers.contains(&"value") || modifiers.contains(&"inline") {
                    ClassKind::Value
                } else {
                    ClassKind::Class
                }
            }
            Some("interface") => ClassKind::Interface,
            Some("object") => ClassKind::Object,
            _ => return Ok(None),
        };
        let keyword = self.bump();

        let name_tok = self.peek();
        let name = match name_tok.kind {
            TokenKind::Ident if !DECLARATION_KEYWORDS.contains(&self.text(name_tok)) => {
                self.bump();
                strip_backticks(self.text(name_tok)).to_string()
            }
            // Anonymous objects and unnamed companions carry nothing to generate from.
            _ if kind == ClassKind::Object => return Ok(None),
            _ => {
                return Err(self.ctx.syntax_error_with_help(
                    format!("expected a name after '{}'", self.text(keyword)),
                    name_tok.span(),
                    "class declarations need a name",
                ));
            }
        };

        let type_params = if self.peek().is_punct('<') {
            Some(self.angle_group()?)
        } else {
            None
        };

        let fields = self.primary_constructor()?;

        if self.eat_punct(':') || self.at_ident("where") {
            self.skip_until_declaration(true)?;
        }

        let mut entries = Vec::new();
        let mut nested = Vec::new();
        if self.peek().is_punct('{') {
            let open = self.bump();
            if kind == ClassKind::Enum {
                entries = self.enum_entries()?;
            }
            nested = self.members()?;
            if !self.eat_punct('}') {
                return Err(self
                    .ctx
                    .syntax_error(format!("unclosed body of '{}'", name), open.span()));
            }
        }

        Ok(Some(ParsedClass {
            name,
            kind,
            type_params,
            fields,
            entries,
            nested,
            offset: name_tok.start,
        }))
    }

    /// Capture `<...>` verbatim, counting nested angle brackets.
    fn angle_group(&mut self) -> Result<String> {
        let open = self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Punct('<') => depth += 1,
                TokenKind::Punct('>') => depth -= 1,
                TokenKind::Eof | TokenKind::Punct('{') | TokenKind::Punct(')') => {
                    return Err(self.ctx.syntax_error("unclosed '<'", open.span()));
                }
                _ => {}
            }
            self.skip_one()?;
        }
        Ok(self.src[open.start..self.prev_end()].to_string())
    }

    fn primary_constructor(&mut self) -> Result<Vec<Field>> {
        let save = self.pos;
        loop {
            if self.peek().is_punct('@') {
                self.annotation()?;
            } else if matches!(
                self.ident_at(0),
                Some("public" | "private" | "internal" | "protected" | "constructor")
            ) {
                self.bump();
            } else {
                break;
            }
        }
        if !self.peek().is_punct('(') {
            self.pos = save;
            return Ok(Vec::new());
        }

        self.bump();
        let mut fields = Vec::new();
        loop {
            if self.eat_punct(')') {
                break;
            }
            fields.push(self.parameter()?);
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')', "separate constructor parameters with ','")?;
            break;
        }
        Ok(fields)
    }

    fn parameter(&mut self) -> Result<Field> {
        let mut annotations = Vec::new();
        let mut visibility = Visibility::Public;
        loop {
            if self.peek().is_punct('@') {
                if let Some(name) = self.annotation()? {
                    annotations.push(name);
                }
            } else if self.at_modifier() {
                let tok = self.bump();
                match self.text(tok) {
                    "private" => visibility = Visibility::Private,
                    "protected" => visibility = Visibility::Protected,
                    "internal" => visibility = Visibility::Internal,
                    _ => {}
                }
            } else {
                break;
            }
        }

        let (is_property, mutable) = match self.ident_at(0) {
            Some("val") => (true, false),
            Some("var") => (true, true),
            _ => (false, false),
        };
        if is_property {
            self.bump();
        }

        let name = strip_backticks(self.expect_ident("parameter name")?).to_string();
        self.expect_punct(':', "constructor parameters need a declared type")?;
        let ty = self.type_ref()?;

        let has_default = self.eat_punct('=');
        if has_default {
            self.skip_default_value()?;
        }

        Ok(Field {
            name,
            ty,
            visibility,
            has_default,
            mutable,
            is_property,
            annotations,
        })
    }

    /// Skip a default value expression up to the next `,` or `)` at depth zero.
    fn skip_default_value(&mut self) -> Result<()> {
        let mut angle = 0usize;
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Punct(',') | TokenKind::Punct(')') if angle == 0 => return Ok(()),
                // Explicit type arguments on calls, e.g. `mapOf<String, Int>()`.
                TokenKind::Punct('<') if self.at_type_args() => {
                    angle += 1;
                    self.bump();
                }
                TokenKind::Punct('>') if angle > 0 => {
                    angle -= 1;
                    self.bump();
                }
                _ => self.skip_one()?,
            }
        }
    }

    /// Whether the `<` at the cursor opens a type argument list rather than
    /// a comparison: it must follow an identifier and be closed by a `>`
    /// with only type syntax in between.
    fn at_type_args(&self) -> bool {
        let follows_ident = self.pos > 0 && self.tokens[self.pos - 1].kind == TokenKind::Ident;
        if !follows_ident {
            return false;
        }

        let (mut angle, mut paren) = (0usize, 0usize);
        for tok in &self.tokens[self.pos..] {
            match tok.kind {
                TokenKind::Punct('<') => angle += 1,
                TokenKind::Punct('>') => {
                    angle -= 1;
                    if angle == 0 {
                        return true;
                    }
                }
                TokenKind::Punct('(') => paren += 1,
                TokenKind::Punct(')') if paren > 0 => paren -= 1,
                TokenKind::Ident | TokenKind::Arrow => {}
                TokenKind::Punct(',' | '.' | '?' | '*' | '@' | ':') => {}
                _ => return false,
            }
        }
        false
    }

    fn enum_entries(&mut self) -> Result<Vec<EnumEntry>> {
        let mut entries = Vec::new();
        loop {
            while self.peek().is_punct('@') {
                self.annotation()?;
            }
            let tok = self.peek();
            match tok.kind {
                TokenKind::Punct(';') => {
                    self.bump();
                    break;
                }
                TokenKind::Punct('}') => break,
                TokenKind::Ident => {
                    self.bump();
                    let mut entry = EnumEntry::new(strip_backticks(self.text(tok)));
                    if self.peek().is_punct('(') {
                        entry.args = Some(self.capture_balanced()?);
                    }
                    if self.peek().is_punct('{') {
                        self.skip_balanced()?;
                    }
                    entries.push(entry);
                    if self.eat_punct(',') {
                        continue;
                    }
                    self.eat_punct(';');
                    break;
                }
                _ => {
                    return Err(self.ctx.syntax_error("expected an enum entry", tok.span()));
                }
            }
        }
        Ok(entries)
    }

    // -- types ------------------------------------------------------------

    fn type_ref(&mut self) -> Result<TypeRef> {
        while self.peek().is_punct('@') {
            self.annotation()?;
        }
        let start = self.peek().start;

        if self.at_ident("suspend") {
            self.bump();
        }
        if self.peek().is_punct('(') {
            self.skip_balanced()?;
            if self.peek().kind == TokenKind::Arrow {
                self.bump();
                self.type_ref()?;
            }
            let nullable = self.eat_punct('?');
            return Ok(self.function_type(start, nullable));
        }

        let name = self.dotted_name("type name")?;
        let mut args = Vec::new();
        if self.peek().is_punct('<') {
            args = self.type_args()?;
        }

        // Function type with receiver, e.g. `String.(Int) -> Unit`.
        if self.peek().is_punct('.') && self.peek_at(1).is_punct('(') {
            self.bump();
            self.skip_balanced()?;
            if self.peek().kind == TokenKind::Arrow {
                self.bump();
                self.type_ref()?;
            }
            return Ok(self.function_type(start, false));
        }

        let nullable = self.eat_punct('?');
        // Definitely non-nullable `T & Any`.
        if self.eat_punct('&') {
            self.type_ref()?;
        }

        Ok(TypeRef {
            name,
            args,
            nullable,
            function: false,
            text: normalize(&self.src[start..self.prev_end()]),
        })
    }

    fn function_type(&self, start: usize, nullable: bool) -> TypeRef {
        let text = normalize(&self.src[start..self.prev_end()]);
        TypeRef {
            name: text.clone(),
            args: Vec::new(),
            nullable,
            function: true,
            text,
        }
    }

    fn type_args(&mut self) -> Result<Vec<TypeArg>> {
        self.bump();
        let mut args = Vec::new();
        loop {
            if self.eat_punct('*') {
                args.push(TypeArg::Star);
            } else {
                let variance = match self.ident_at(0) {
                    Some("out") if self.peek_at(1).kind == TokenKind::Ident => Variance::Out,
                    Some("in") if self.peek_at(1).kind == TokenKind::Ident => Variance::In,
                    _ => Variance::Invariant,
                };
                if variance != Variance::Invariant {
                    self.bump();
                }
                let ty = self.type_ref()?;
                args.push(TypeArg::Type { variance, ty });
            }
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct('>', "close the type argument list with '>'")?;
            break;
        }
        Ok(args)
    }
}

fn closer(open: Token) -> char {
    match open.kind {
        TokenKind::Punct('(') => ')',
        TokenKind::Punct('[') => ']',
        _ => '}',
    }
}

/// Collapse whitespace runs so multi-line types render on one line.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
