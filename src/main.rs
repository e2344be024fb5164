// minikconf: check a Kconfig file set for undeclared symbols

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use minikconf::parser::constants::{DEFAULT_ROOT_FILE, MAX_EXPRESSION_DEPTH, MAX_INCLUDE_DEPTH};
use minikconf::{parse_file_with, KconfigError, ParseOptions};

/// Validate a Kconfig file and everything it includes
#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// Root Kconfig file
    #[arg(default_value = DEFAULT_ROOT_FILE)]
    file: PathBuf,

    /// Print the declared symbols, one per line, on success
    #[arg(long)]
    list: bool,

    #[arg(long, default_value_t = MAX_INCLUDE_DEPTH)]
    max_include_depth: usize,

    #[arg(long, default_value_t = MAX_EXPRESSION_DEPTH)]
    max_expression_depth: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging goes to stderr; quiet unless RUST_LOG says otherwise
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let options = ParseOptions {
        max_expression_depth: args.max_expression_depth,
        max_include_depth: args.max_include_depth,
    };

    let data = match parse_file_with(&args.file, options) {
        Ok(data) => data,
        Err(err) => {
            report(&err);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        file = %args.file.display(),
        symbols = data.declared().len(),
        "no undefined symbols"
    );

    if args.list {
        let mut stdout = io::stdout().lock();
        for name in data.declared() {
            if writeln!(stdout, "{}", name).is_err() {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn report(err: &KconfigError) {
    let message = err.to_string();
    if io::stderr().is_tty() {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{}", message);
    }
}
