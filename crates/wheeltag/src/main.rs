use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::commands::ExitStatus;

mod commands;
mod logging;

/// Print the canonical filename of a binary wheel for the current build environment.
///
/// The name, version, and platform are taken verbatim; no validation is
/// performed on any of them.
#[derive(Parser)]
#[command(author, about)]
struct Cli {
    /// The package name.
    #[arg(short, long, default_value = "UNKNOWN")]
    name: String,

    /// The package version.
    // Short `-v` is the *package* version, matching `bdist_wheel`-style
    // tooling, which is why clap's own version flag stays unregistered.
    #[arg(short = 'v', long, default_value = "0.0.0")]
    version: String,

    /// The package target platform, replacing the detected platform tag.
    #[arg(short, long)]
    plat_name: Option<String>,

    /// The Python interpreter to query for the implementation and ABI tags,
    /// as a version (`3.11`), a binary name (`python3.11`), or a path.
    /// Defaults to `python3` in `PATH`.
    #[arg(long)]
    python: Option<String>,

    /// Use verbose output.
    #[arg(long)]
    verbose: bool,
}

fn inner() -> Result<ExitStatus> {
    let cli = Cli::parse();

    logging::setup_logging(if cli.verbose {
        logging::Level::Verbose
    } else {
        logging::Level::Default
    });

    commands::wheel_name(
        &cli.name,
        &cli.version,
        cli.plat_name.as_deref(),
        cli.python.as_deref(),
    )
}

fn main() -> ExitCode {
    match inner() {
        Ok(code) => code.into(),
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                let mut causes = err.chain();
                eprintln!("{}: {}", "error".red().bold(), causes.next().unwrap());
                for err in causes {
                    eprintln!("  {}: {}", "Caused by".red().bold(), err);
                }
            }
            ExitStatus::Error.into()
        }
    }
}
