use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{InputArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let request = self.input.load_request();
        let config = self.input.load_config()?;

        let outcome = ops::run_pipeline(&request, config).unwrap_or_exit();
        let report = ops::generate(
            outcome,
            ops::generate::GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
