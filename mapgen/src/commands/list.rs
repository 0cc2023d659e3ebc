use clap::Args;
use eyre::Result;

use super::SourceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub sources: SourceArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let (_, project) = self.sources.load();

        ops::list(&project).render(&mut TerminalOutput::new());

        Ok(())
    }
}
