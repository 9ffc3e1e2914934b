mod error;
mod logging;
mod release;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "shiplog")]
#[command(version = env!("SHIPLOG_VERSION"))]
#[command(about = "Release the next version from closed issues", long_about = None)]
#[command(group(ArgGroup::new("bump").args(["major", "minor", "patch"])))]
#[command(group(ArgGroup::new("prerelease").args(["alpha", "beta"])))]
struct Cli {
    /// Bump the major version
    #[arg(short = 'M', long)]
    major: bool,

    /// Bump the minor version
    #[arg(short = 'm', long)]
    minor: bool,

    /// Bump the patch version (default)
    #[arg(short = 'p', long)]
    patch: bool,

    /// Publish as pre-release `alpha.TAG`
    #[arg(short = 'a', long, value_name = "TAG")]
    alpha: Option<String>,

    /// Publish as pre-release `beta.TAG`
    #[arg(short = 'b', long, value_name = "TAG")]
    beta: Option<String>,

    /// Show the next version and changelog without changing anything
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Directory to start configuration discovery from (default: current directory)
    #[arg(long = "path", short = 'C')]
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return exit_for_parse_error(&e),
    };

    logging::init();

    let result = resolve_start_path(cli.path.clone())
        .and_then(|start_path| release::run(&cli, &start_path));

    if let Err(e) = result {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Help and version go to stdout with success; every other parse failure
/// is a usage error.
fn exit_for_parse_error(error: &clap::Error) -> ExitCode {
    let _ = error.print();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn resolve_start_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
