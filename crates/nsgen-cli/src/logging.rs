//! Tracing subscriber initialisation.
//!
//! Only the CLI installs a subscriber; the library crates emit spans and
//! events and nothing else.
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! `RUST_LOG` replaces the computed filter when set. From `-vv` upward the
//! event target and source location are printed too.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::GlobalArgs,
    error::{CliError, CliResult},
};

/// Crates whose events pass the computed filter.
const CRATES: [&str; 3] = ["nsgen", "nsgen_core", "nsgen_adapters"];

/// Install the global subscriber. Call once, before any event fires.
pub fn init_logging(args: &GlobalArgs) -> CliResult<()> {
    let level = level_for(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let detailed = level >= LevelFilter::DEBUG;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(detailed)
        .with_file(detailed)
        .with_line_number(detailed)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Internal {
            message: format!("Failed to initialise tracing: {e}"),
        })
}

fn filter_directive(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn default_is_warn() {
        assert_eq!(level_for(&args(0, false)), LevelFilter::WARN);
    }

    #[test]
    fn verbose_count_raises_level() {
        assert_eq!(level_for(&args(1, false)), LevelFilter::INFO);
        assert_eq!(level_for(&args(2, false)), LevelFilter::DEBUG);
        assert_eq!(level_for(&args(3, false)), LevelFilter::TRACE);
        assert_eq!(level_for(&args(10, false)), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directive_covers_every_crate() {
        assert_eq!(
            filter_directive(LevelFilter::DEBUG),
            "nsgen=debug,nsgen_core=debug,nsgen_adapters=debug"
        );
    }
}
