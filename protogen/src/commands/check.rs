use clap::Args;
use eyre::Result;

use super::{InputArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub input: InputArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let request = self.input.load_request();
        let config = self.input.load_config()?;

        let outcome = ops::run_pipeline(&request, config).unwrap_or_exit();
        let report = ops::check(&self.input.request, &request, outcome);

        report.render(&mut TerminalOutput::new());
        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
