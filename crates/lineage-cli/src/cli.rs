//! CLI argument definitions for the lineage explainer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use lineage_explain::config::{DEFAULT_TIMEOUT_SECS, ENDPOINT_ENV, HOST_ENV, TOKEN_ENV};

#[derive(Parser)]
#[command(
    name = "explain-lineage",
    version,
    about = "Explain Data Lineage - inspect how an attribute value was chosen among sources",
    long_about = "Render a data-lineage decision as a merge table of priority configuration,\n\
                  source data and result, and ask a model serving endpoint to explain it\n\
                  or to look for inconsistencies in the source data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Lineage record JSON file (default: built-in sample record).
    #[arg(long = "record", value_name = "PATH", global = true)]
    pub record: Option<PathBuf>,

    /// Name of the model serving endpoint.
    #[arg(long = "endpoint", env = ENDPOINT_ENV, global = true)]
    pub endpoint: Option<String>,

    /// Serving workspace URL.
    #[arg(long = "host", env = HOST_ENV, global = true)]
    pub host: Option<String>,

    /// Access token for the serving workspace.
    #[arg(long = "token", env = TOKEN_ENV, hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Request timeout for serving calls, in seconds.
    #[arg(long = "timeout-secs", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow prompt and answer text in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the lineage decision and optionally ask the model about it.
    Show(ShowArgs),

    /// Recompute the priority rule and compare it with the recorded result.
    Resolve,

    /// Check whether the serving endpoint supports chat requests.
    Endpoint,
}

impl Command {
    /// Whether the startup capability check is worth a network round trip.
    ///
    /// `resolve` never talks to the endpoint and `endpoint` runs the check itself.
    pub fn wants_capability_check(&self) -> bool {
        matches!(self, Self::Show(_))
    }
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Evaluate the source data for inconsistency.
    #[arg(long = "evaluate")]
    pub evaluate: bool,

    /// Explain the result.
    #[arg(long = "explain")]
    pub explain: bool,

    /// Export the merge table as CSV.
    #[arg(long = "export", value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Command {
        Cli::try_parse_from(args).expect("parse").command
    }

    #[test]
    fn only_show_runs_capability_check() {
        assert!(command(&["explain-lineage", "show", "--explain"]).wants_capability_check());
        assert!(!command(&["explain-lineage", "resolve"]).wants_capability_check());
        assert!(!command(&["explain-lineage", "endpoint"]).wants_capability_check());
    }

    #[test]
    fn show_flags_parse() {
        let Command::Show(args) = command(&["explain-lineage", "show", "--evaluate", "--export", "t.csv"])
        else {
            panic!("expected show");
        };
        assert!(args.evaluate);
        assert!(!args.explain);
        assert_eq!(args.export, Some(PathBuf::from("t.csv")));
    }
}
