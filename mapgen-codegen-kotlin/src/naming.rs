//! Kotlin-specific naming conventions.

use mapgen_codegen::language::NamingConvention;

fn escape_kotlin_reserved(name: &str) -> String {
    format!("`{}`", name)
}

/// Kotlin naming conventions: hard keywords must be quoted with backticks.
pub const KOTLIN_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[
        "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
        "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
        "true", "try", "typealias", "typeof", "val", "var", "when", "while",
    ],
    escape_reserved: escape_kotlin_reserved,
};
