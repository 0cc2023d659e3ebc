//! Reserved-word handling for generated identifiers.

/// Language-specific naming rules.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Words that cannot be used as plain identifiers
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "in" -> "`in`" in Kotlin)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Escape every segment of a dotted name (e.g., a package path).
    pub fn safe_path(&self, path: &str) -> String {
        path.split('.')
            .map(|segment| self.safe_name(segment))
            .collect::<Vec<_>>()
            .join(".")
    }
}
