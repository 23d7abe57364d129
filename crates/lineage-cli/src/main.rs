//! Explain Data Lineage CLI.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use lineage_cli::logging::{LogConfig, LogFormat, init_logging};
use lineage_explain::{Explainer, ServingClient, ServingSettings, Session};
use lineage_model::{LineageRecord, sample_record};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_endpoint, run_resolve, run_show};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start async runtime: {error}");
            std::process::exit(1);
        }
    };
    let exit_code = match runtime.block_on(run(&cli)) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Load the record, resolve serving settings, and dispatch the command.
///
/// Returns `false` when the command completed but something needs attention.
async fn run(cli: &Cli) -> Result<bool> {
    let record = load_record(cli)?;
    let settings = ServingSettings {
        endpoint: cli.endpoint.clone(),
        host: cli.host.clone(),
        token: cli.token.clone(),
        timeout_secs: cli.timeout_secs,
    };
    let config = settings.resolve()?;
    let client = ServingClient::new(&config).context("build serving client")?;
    let explainer = Explainer::new(client, config.endpoint.clone());

    if cli.command.wants_capability_check() {
        match explainer.endpoint_supported().await {
            Ok(supported) => info!(endpoint = %config.endpoint, supported, "endpoint capability"),
            Err(error) => warn!(endpoint = %config.endpoint, %error, "endpoint capability check failed"),
        }
    }

    let mut session = Session::new(record);
    match &cli.command {
        Command::Show(args) => run_show(args, &mut session, &explainer).await,
        Command::Resolve => run_resolve(&session),
        Command::Endpoint => run_endpoint(&explainer).await,
    }
}

fn load_record(cli: &Cli) -> Result<LineageRecord> {
    match &cli.record {
        Some(path) => LineageRecord::from_path(path)
            .with_context(|| format!("read lineage record {}", path.display())),
        None => sample_record().context("load built-in sample record"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config.with_log_data(cli.log_data)
}
