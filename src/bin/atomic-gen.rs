//! Command-line front end: reads a structure file, generates the project, writes it to disk.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use atomic_codegen::{generate, DirectorySink, GenerateError, GenerateOptions, Structure};
use clap::Parser;
use flexi_logger::Logger;
use log::{error, info, warn};

#[derive(Parser)]
#[command(name = "atomic-gen")]
#[command(about = "Generate a React project from an atomic design structure", long_about = None)]
#[command(version)]
struct Cli {
    /// Structure JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Only emit components, no project boilerplate
    #[arg(long)]
    no_scaffold: bool,

    /// Skip the JSX parse check on generated units
    #[arg(long)]
    no_verify: bool,

    /// Compose units on the current thread
    #[arg(long)]
    sequential: bool,

    /// Extension of generated component files
    #[arg(long, default_value = "jsx")]
    extension: String,

    /// Log filter, e.g. `info` or `atomic_codegen=debug`. Falls back to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            verify_syntax: !self.no_verify,
            parallel: !self.sequential,
            scaffold: !self.no_scaffold,
            extension: self.extension.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());
    let _logger = match Logger::try_with_str(&filter).and_then(|logger| logger.log_to_stderr().start())
    {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("invalid log level `{filter}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=generate_failed code={} error={}", err.code(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), GenerateError> {
    let bytes = fs::read(&cli.input).map_err(|source| GenerateError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let structure = Structure::from_slice(&bytes)?;

    let output = generate(&structure, &cli.options())?;
    let written = output.persist(&mut DirectorySink::new(&cli.output))?;

    if !output.diagnostics.is_empty() {
        warn!(
            "event=generate_degraded diagnostics={}",
            output.diagnostics.len()
        );
    }
    info!(
        "event=done output={} files={} route={}",
        cli.output.display(),
        written,
        output.route.path
    );
    Ok(())
}
