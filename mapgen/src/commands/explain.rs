use clap::Args;
use eyre::Result;
use mapgen_codegen::pipeline::GenerateOptions;

use super::SourceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Also show what would be generated for this class
    pub class: Option<String>,

    #[command(flatten)]
    pub sources: SourceArgs,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let selection = self.class.as_ref().map(|class| {
            let (config, project) = self.sources.load();
            let generator = &config.generator;
            let mut options =
                GenerateOptions::new(class).mapper(generator.mapper.unwrap_or_default());
            if let Some(suffix) = &generator.suffix {
                options = options.suffix(suffix);
            }
            (project, options)
        });

        let report = ops::explain(selection)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
