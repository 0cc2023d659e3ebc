//! Kotlin import collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use mapgen_core::{package_of, short_name};
use mapgen_ir::Import;
use serde::Serialize;

/// Packages every Kotlin/JVM file imports implicitly.
pub const DEFAULT_IMPORT_PACKAGES: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.jvm",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
    "java.lang",
];

/// Whether symbols of `package` are visible without an import.
pub fn is_default_import(package: &str) -> bool {
    DEFAULT_IMPORT_PACKAGES.contains(&package)
}

/// Deduplicated import directives of one output file.
///
/// Symbols are grouped by package in insertion order; rendering sorts the
/// directives so output does not depend on discovery order.
///
/// ```
/// use mapgen_codegen::generation::ImportSet;
/// use mapgen_ir::Import;
///
/// let mut imports = ImportSet::new();
/// imports.add("java.time", "Instant");
/// imports.add_import(&Import::symbol("java.time.Instant"));
/// imports.add_import(&Import::star("com.example.shared"));
///
/// assert_eq!(
///     imports.directives(),
///     vec!["com.example.shared.*", "java.time.Instant"]
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSet {
    /// Package path -> imported symbols (`Name`, `Name as Alias` or `*`)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a package.
    pub fn add(&mut self, package: &str, symbol: &str) {
        self.imports
            .entry(package.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add a parsed import directive.
    pub fn add_import(&mut self, import: &Import) {
        if import.star {
            self.add(&import.path, "*");
            return;
        }
        let symbol = match &import.alias {
            Some(alias) => format!("{} as {}", short_name(&import.path), alias),
            None => short_name(&import.path).to_string(),
        };
        self.add(package_of(&import.path), &symbol);
    }

    /// Add an import for a fully-qualified name unless it is already visible
    /// from `file_package` (same package or implicitly imported).
    pub fn add_reference(&mut self, fq_name: &str, file_package: &str) {
        let package = package_of(fq_name);
        if package.is_empty() || package == file_package || is_default_import(package) {
            return;
        }
        self.add(package, short_name(fq_name));
    }

    /// Merge another set into this one.
    pub fn merge(&mut self, other: &ImportSet) {
        for (package, symbols) in &other.imports {
            self.imports
                .entry(package.clone())
                .or_default()
                .extend(symbols.iter().cloned());
        }
    }

    pub fn has_symbol(&self, package: &str, symbol: &str) -> bool {
        self.imports
            .get(package)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Keep only the symbols for which `keep(package, symbol)` holds.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        for (package, symbols) in self.imports.iter_mut() {
            symbols.retain(|symbol| keep(package, symbol));
        }
        self.imports.retain(|_, symbols| !symbols.is_empty());
    }

    /// Iterate over packages and their symbols in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Directive texts (after the `import` keyword), sorted.
    pub fn directives(&self) -> Vec<String> {
        let mut directives: Vec<String> = self
            .iter()
            .flat_map(|(package, symbols)| {
                symbols.iter().map(move |symbol| {
                    if package.is_empty() {
                        symbol.clone()
                    } else {
                        format!("{}.{}", package, symbol)
                    }
                })
            })
            .collect();
        directives.sort();
        directives
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of import directives.
    pub fn len(&self) -> usize {
        self.imports.values().map(BTreeSet::len).sum()
    }
}

/// Name an import symbol introduces into scope, `None` for star imports.
pub fn local_name(symbol: &str) -> Option<&str> {
    if symbol == "*" {
        return None;
    }
    Some(symbol.rsplit(" as ").next().unwrap_or(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_import_groups_by_package() {
        let mut imports = ImportSet::new();
        imports.add_import(&Import::symbol("java.util.UUID"));
        imports.add_import(&Import::symbol("java.util.Date"));
        imports.add_import(&Import::symbol("java.util.UUID"));

        assert_eq!(imports.len(), 2);
        assert!(imports.has_symbol("java.util", "Date"));
    }

    #[test]
    fn test_alias_and_star() {
        let mut imports = ImportSet::new();
        imports.add_import(&Import {
            path: "com.example.shared.Money".to_string(),
            alias: Some("Cash".to_string()),
            star: false,
        });
        imports.add_import(&Import::star("com.example.util"));

        assert_eq!(
            imports.directives(),
            vec!["com.example.shared.Money as Cash", "com.example.util.*"]
        );
    }

    #[test]
    fn test_add_reference_skips_visible_names() {
        let mut imports = ImportSet::new();
        imports.add_reference("kotlin.collections.List", "com.example");
        imports.add_reference("com.example.User", "com.example");
        imports.add_reference("Orphan", "com.example");
        imports.add_reference("com.other.Money", "com.example");

        assert_eq!(imports.directives(), vec!["com.other.Money"]);
    }

    #[test]
    fn test_retain_drops_empty_packages() {
        let mut imports = ImportSet::new();
        imports.add("java.time", "Instant");
        imports.add("java.util", "UUID");
        imports.retain(|_, symbol| symbol == "UUID");

        assert_eq!(imports.iter().count(), 1);
        assert_eq!(imports.directives(), vec!["java.util.UUID"]);
    }

    #[test]
    fn test_merge() {
        let mut a = ImportSet::new();
        a.add("java.time", "Instant");
        let mut b = ImportSet::new();
        b.add("java.time", "Duration");
        b.add("java.util", "UUID");
        a.merge(&b);

        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("UUID"), Some("UUID"));
        assert_eq!(local_name("Money as Cash"), Some("Cash"));
        assert_eq!(local_name("*"), None);
    }
}
