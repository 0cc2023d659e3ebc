use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for source loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the content and filename of one input so error factories don't need
/// both passed around.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "User.kt");
/// ctx.syntax_error("expected ':' after parameter name", 42..46);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a Kotlin syntax error at the given span.
    pub fn syntax_error(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: span.into(),
            message: message.into(),
            help: None,
        })
    }

    /// Create a Kotlin syntax error with a hint.
    pub fn syntax_error_with_help(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
        help: impl Into<String>,
    ) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: span.into(),
            message: message.into(),
            help: Some(help.into()),
        })
    }

    /// Create a config parse error from a toml error.
    pub fn config_parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a config validation error, pointing at `needle` when it occurs in the source.
    pub fn config_error(&self, message: impl Into<String>, needle: &str) -> Box<Error> {
        let span = find_span(&self.src, needle);
        Box::new(Error::Config {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

/// Locate the first quoted occurrence of `needle` in a TOML document.
fn find_span(src: &str, needle: &str) -> Option<SourceSpan> {
    if needle.is_empty() {
        return None;
    }
    let quoted = format!("\"{}\"", needle);
    src.find(&quoted)
        .map(|offset| SourceSpan::from((offset + 1, needle.len())))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(mapgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(mapgen::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("failed to parse mapgen.toml")]
    #[diagnostic(code(mapgen::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(mapgen::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("no Kotlin sources found under '{path}'")]
    #[diagnostic(
        code(mapgen::no_sources),
        help("pass the directory that contains your .kt files with --source")
    )]
    NoSources { path: PathBuf },
}

impl Error {
    /// Create an io error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_locates_quoted_value() {
        let src = "[generator]\nsuffix = \"Dto-\"\n";
        let span = find_span(src, "Dto-").unwrap();
        assert_eq!(span.offset(), src.find("Dto-").unwrap());
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn test_find_span_missing() {
        assert!(find_span("[generator]", "Model").is_none());
        assert!(find_span("[generator]", "").is_none());
    }

    #[test]
    fn test_syntax_error_carries_help() {
        let ctx = SourceContext::new("data class", "User.kt");
        let err = ctx.syntax_error_with_help("expected class name", 5..10, "name the class");
        match *err {
            Error::Syntax { help, message, .. } => {
                assert_eq!(message, "expected class name");
                assert_eq!(help.as_deref(), Some("name the class"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
