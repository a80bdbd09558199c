mod error;
mod model;
mod modules;
mod scan;
mod subdomains;
mod utils;

pub use error::{Error, Result};

use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};
use modules::nuclei::NUCLEI_BIN;
use scan::{scan, ScanConfig};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::error;
use utils::log::{file_dispatch, parse_log_level, stderr_dispatch};

fn main() -> Result<()> {
    // log file lands in the working directory
    let vulnerable = run_cli(env::args_os(), Path::new("."))?;
    println!("Vulnerable subdomains: {:?}", vulnerable);

    Ok(())
}

fn run_cli<I, T>(argv: I, log_dir: &Path) -> Result<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match cli().try_get_matches_from(argv) {
        Ok(args) => execute(&args, log_dir),
        Err(err) => usage_error(err),
    }
}

fn cli() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about("Check subdomains for takeover indicators, then run nuclei over them")
        .arg(
            Arg::new("input")
                .help("File with one subdomain per line")
                .value_name("INPUT")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("File receiving one result line per checked subdomain")
                .value_name("OUTPUT")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("log_level")
                .help("Log level (debug, info, warning, error, critical...)")
                .value_name("LOG_LEVEL")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::new("scanner")
                .long("scanner")
                .help("Nuclei executable, looked up in PATH")
                .value_name("BIN")
                .default_value(NUCLEI_BIN),
        )
}

fn execute(args: &ArgMatches, log_dir: &Path) -> Result<Vec<String>> {
    // an invalid level stops the run before the input is even opened
    let level = parse_log_level(&required(args, "log_level")?)?;
    let dispatch = file_dispatch(level, log_dir)?;

    let config = ScanConfig {
        input: PathBuf::from(required(args, "input")?),
        output: PathBuf::from(required(args, "output")?),
        scanner: required(args, "scanner")?,
    };

    tracing::dispatcher::with_default(&dispatch, || scan(&config))
}

fn required(args: &ArgMatches, id: &str) -> Result<String> {
    args.get_one::<String>(id)
        .cloned()
        .ok_or_else(|| Error::CliUsage(format!("missing {}", id)))
}

fn usage_error<T>(err: clap::Error) -> Result<T> {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
    }

    tracing::dispatcher::with_default(&stderr_dispatch(), || {
        error!("Incorrect usage. Expected three command-line arguments.");
    });
    // usage goes to stderr, nothing else to report if that fails
    let _ = err.print();

    Err(Error::CliUsage(format!("{:?}", err.kind())))
}
