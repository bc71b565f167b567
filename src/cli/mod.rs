use std::{process::ExitCode, sync::Once};

use clap::{arg, Command};

mod run;

use self::run::run_match;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`, if it is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}

pub fn cli() -> Command {
    Command::new("matchmaker")
        .about("structural pattern matching over runtime values")
        .version("0.1.0")
        .subcommand_required(true)
        .subcommand(
            Command::new("match")
                .arg(arg!(<VALUE> "Value to match, e.g. '[1, :ok, {:a => 2}]'"))
                .arg(arg!(<PATTERN> ... "Patterns tried in order, e.g. '[Integer @ n, *_]'"))
                .arg(arg!(-d --debug "Print tokens and compiled patterns"))
                .arg_required_else_help(true)
                .about("Match a value against patterns, first match wins"),
        )
}

pub fn parse_cli() -> ExitCode {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("match", args)) => {
            let Some(value) = args.get_one::<String>("VALUE") else {
                return ExitCode::FAILURE;
            };
            let patterns: Vec<&str> = args
                .get_many::<String>("PATTERN")
                .map(|patterns| patterns.map(String::as_str).collect())
                .unwrap_or_default();
            let debug = args.get_flag("debug");

            if let Err(error) = run_match(value, &patterns, debug) {
                eprintln!("{error:?}");
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        _ => ExitCode::FAILURE,
    }
}
