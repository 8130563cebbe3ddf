//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, ValueHint};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Without the flag only warnings and errors are logged. `RUST_LOG`
    /// overrides the level entirely.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also set by NO_COLOR)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read configuration from FILE instead of the default location
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "NSGEN_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// How results are rendered on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped
    #[default]
    Auto,
    /// Colours, symbols and progress spinners
    Human,
    /// Uncoloured text
    Plain,
    /// Machine-readable JSON
    Json,
}
