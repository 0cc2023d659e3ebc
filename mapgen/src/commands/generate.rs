use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;

use super::{SelectionArgs, SourceArgs};
use crate::{
    ops::{self, generate::RunOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Replace generated files that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of the pipeline state after each phase to DIR
    #[arg(long, value_name = "DIR")]
    pub visualize: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let (config, project) = self.sources.load();
        let mut options = self.selection.options(&config);
        options.overwrite |= self.force;

        let report = ops::generate(
            project,
            options,
            RunOptions {
                base: Path::new("."),
                dry_run: self.dry_run,
                visualize: self.visualize.clone(),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
