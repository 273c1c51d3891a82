//! `schemegen` - generate theme files from a parameter document and a template.
//!
//! ```text
//! schemegen <PARAMETERS> [TEMPLATE] [OUTPUT_DIR] [--force] [--extension <EXT>] [--lenient] [-v]
//! ```
//!
//! Only one run per parameter file executes at a time; a second run waits up to
//! ten seconds for the first to finish and then gives up.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use console::style;
use schemegen::{GenerateError, Generator, LockError, PlaceholderRenderer, DEFAULT_EXTENSION};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "schemegen", version, about = "Generate theme files from a template")]
struct Cli {
    /// Generator parameter document (JSON, or YAML by extension).
    parameters: PathBuf,

    /// Template file [default: Theme.Template.xaml next to PARAMETERS].
    template: Option<PathBuf>,

    /// Output directory [default: the template's directory].
    output_dir: Option<PathBuf>,

    /// Write every file even when its content is unchanged.
    #[arg(long)]
    force: bool,

    /// Extension of the generated files.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Leave placeholders without a value in the output instead of failing.
    #[arg(long)]
    lenient: bool,

    /// Log every target and whether it was written.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(GenerateError::Lock(LockError::Timeout { .. })) =
                err.downcast_ref::<GenerateError>()
            {
                eprintln!(
                    "{} another instance is generating from {}; giving up",
                    style("error:").red().bold(),
                    cli.parameters.display()
                );
            }
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let started = Instant::now();

    let renderer = if cli.lenient {
        PlaceholderRenderer::lenient()
    } else {
        PlaceholderRenderer::new()
    };
    let generator = Generator::new()
        .renderer(renderer)
        .force(cli.force)
        .extension(cli.extension.as_str());

    let report = generator
        .generate_exclusive(
            &cli.parameters,
            cli.template.as_deref(),
            cli.output_dir.as_deref(),
        )
        .with_context(|| format!("generation from {} failed", cli.parameters.display()))?;

    tracing::info!(
        targets = report.targets,
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        elapsed = ?started.elapsed(),
        "generation finished"
    );
    Ok(())
}

/// Missing arguments print the usage on stdout and exit with 1.
fn parse_failure(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::MissingRequiredArgument => {
            println!("You have to pass the generator parameter file as a command line argument.");
            println!();
            println!("{}", Cli::command().render_usage());
            ExitCode::FAILURE
        }
        _ => {
            let _ = err.print();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("schemegen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
