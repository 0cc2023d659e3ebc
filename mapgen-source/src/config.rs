//! `mapgen.toml` configuration.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use mapgen_core::filter_identifier;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, SourceContext};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "mapgen.toml";

/// Root of `mapgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Generator defaults
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// The `[generator]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Default suffix for generated classes.
    pub suffix: Option<String>,
    /// Where mapper functions are emitted.
    pub mapper: Option<MapperPlacement>,
    /// Directories scanned for Kotlin sources.
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    /// Replace generated files that already exist.
    #[serde(default)]
    pub overwrite: bool,
}

/// Where the `mapTo<Suffix>()` functions are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapperPlacement {
    /// Next to the generated class, in the same file.
    #[default]
    Inline,
    /// In a sibling `<Name><Suffix>Mapper.kt` file.
    Separate,
}

impl MapperPlacement {
    /// Returns the placement identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapperPlacement::Inline => "inline",
            MapperPlacement::Separate => "separate",
        }
    }
}

impl fmt::Display for MapperPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MapperPlacement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(MapperPlacement::Inline),
            "separate" => Ok(MapperPlacement::Separate),
            _ => Err(format!(
                "unknown mapper placement '{}', expected 'inline' or 'separate'",
                s
            )),
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Config::from_str_with_filename(s, CONFIG_FILE)
    }
}

impl Config {
    /// Parse a config from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Config = toml::from_str(content).map_err(|e| ctx.config_parse_error(e))?;
        config.validate(&ctx)?;
        Ok(config)
    }

    /// Open and parse a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Config::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Load `mapgen.toml` from `dir` when present.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.is_file() {
            Config::open(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if let Some(suffix) = &self.generator.suffix {
            if suffix.is_empty() {
                return Err(ctx.config_error("suffix must not be empty", "suffix"));
            }
            if filter_identifier(suffix) != *suffix {
                return Err(ctx.config_error(
                    format!(
                        "suffix '{}' may only contain letters, digits, '_' and '$'",
                        suffix
                    ),
                    suffix,
                ));
            }
        }
        Ok(())
    }
}
