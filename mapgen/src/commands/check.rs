use clap::Args;
use eyre::Result;

use super::{SelectionArgs, SourceArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub sources: SourceArgs,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let (config, project) = self.sources.load();

        let report = ops::check(project, self.selection.options(&config))?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
