mod check;
mod completions;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate::GenerateCommand;
use protogen_codegen::GeneratorConfig;
use protogen_ir::GenerateRequest;

use crate::ops;

/// Default configuration file, read when present.
const DEFAULT_CONFIG: &str = "protogen.toml";

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for protogen_ir::Result<T> {
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

impl<T> UnwrapOrExit<T> for protogen_codegen::Result<T> {
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
#[command(name = "protogen")]
#[command(version)]
#[command(about = "Generate Rust data types from protobuf descriptor requests")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for every file the request marks for generation
    Generate(GenerateCommand),

    /// Run the pipeline without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Inputs shared by the commands that run the pipeline.
#[derive(clap::Args)]
pub(crate) struct InputArgs {
    /// Path to the request JSON
    pub request: PathBuf,

    /// Path to protogen.toml (defaults to ./protogen.toml when it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generator parameters (`key=value,key=value`), applied last
    #[arg(short, long = "param")]
    pub params: Vec<String>,
}

impl InputArgs {
    /// Load the request with the command-line parameters merged in.
    pub fn load_request(&self) -> GenerateRequest {
        let mut request = GenerateRequest::open(&self.request).unwrap_or_exit();
        request.parameter = ops::merge_parameters(request.parameter.as_deref(), &self.params);
        request
    }

    /// Load the generator configuration file, if any.
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let path = match &self.config {
            Some(path) => path.as_path(),
            None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
            None => return Ok(GeneratorConfig::default()),
        };

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Ok(GeneratorConfig::from_toml_str_with_filename(&content, &path.display().to_string())
            .unwrap_or_exit())
    }
}
