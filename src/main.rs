//! `hmstl`: turns a grayscale PGM heightmap into a closed ASCII STL solid.
#![forbid(unsafe_code)]

mod cli;
mod config;
mod error;
mod run;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use cli::Cli;
use config::Settings;

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    // Info lines are the report itself and print bare.
    let logger = env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        })
        .try_init();
    if let Err(e) = logger {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = Settings::from_cli(&cli).and_then(|settings| run::run(&settings));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
