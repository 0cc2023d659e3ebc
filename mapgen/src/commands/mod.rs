mod check;
mod completions;
mod explain;
mod generate;
mod list;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use generate::GenerateCommand;
use list::ListCommand;
use mapgen_codegen::pipeline::{DEFAULT_SUFFIX, GenerateOptions};
use mapgen_ir::Project;
use mapgen_source::{Config, Loader, MapperPlacement};

/// Extension trait for exiting on source errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mapgen_source::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "mapgen")]
#[command(version)]
#[command(about = "Generate mapped Kotlin data classes and mapTo functions")]
pub(crate) struct Cli {
    /// Log debug output (MAPGEN_LOG overrides)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the mapped classes and mapper functions for a class
    Generate(GenerateCommand),

    /// Plan a generation and report diagnostics without writing files
    Check(CheckCommand),

    /// List the declarations found in the sources
    List(ListCommand),

    /// Describe the generation pipeline
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where the Kotlin sources and the configuration come from.
#[derive(Args)]
pub struct SourceArgs {
    /// Kotlin source directory or file; repeatable (defaults to the config's
    /// sources, then to the current directory)
    #[arg(short, long = "source", value_name = "PATH")]
    pub sources: Vec<PathBuf>,

    /// Path to mapgen.toml (defaults to ./mapgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Read the configuration and parse the sources, exiting with a
    /// diagnostic on failure.
    pub fn load(&self) -> (Config, Project) {
        let config = match &self.config {
            Some(path) => Config::open(path).unwrap_or_exit(),
            None => Config::discover(".").unwrap_or_exit().unwrap_or_default(),
        };

        let roots = if !self.sources.is_empty() {
            self.sources.clone()
        } else if !config.generator.sources.is_empty() {
            config.generator.sources.clone()
        } else {
            vec![PathBuf::from(".")]
        };
        let project = roots
            .into_iter()
            .fold(Loader::new(), |loader, root| loader.root(root))
            .load()
            .unwrap_or_exit();

        (config, project)
    }
}

/// The class to generate from and the names to give the result.
#[derive(Args)]
pub struct SelectionArgs {
    /// Simple, nested (Outer.Inner) or fully-qualified class name
    pub class: String,

    /// Name of the generated root class, before the suffix (defaults to the
    /// class name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Suffix appended to generated class names
    #[arg(long)]
    pub suffix: Option<String>,

    /// Where mapper functions go: inline or separate
    #[arg(short, long)]
    pub mapper: Option<MapperPlacement>,
}

impl SelectionArgs {
    /// Command line values win over the configuration.
    pub fn options(&self, config: &Config) -> GenerateOptions {
        let generator = &config.generator;
        let suffix = self
            .suffix
            .as_deref()
            .or(generator.suffix.as_deref())
            .unwrap_or(DEFAULT_SUFFIX);
        let options = GenerateOptions::new(&self.class)
            .suffix(suffix)
            .mapper(self.mapper.or(generator.mapper).unwrap_or_default())
            .overwrite(generator.overwrite);

        match &self.name {
            Some(name) => options.name(name),
            None => options,
        }
    }
}
