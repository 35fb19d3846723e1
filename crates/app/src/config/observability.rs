//! Log Output Settings

use clap::Args;

/// How log lines are written to stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One short line per event, for terminals.
    #[default]
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Verbosity and format of the `marquee` logs.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` holds no directives
    #[arg(short, long, env = "MARQUEE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Output format (compact, json)
    #[arg(long, env = "MARQUEE_LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}
