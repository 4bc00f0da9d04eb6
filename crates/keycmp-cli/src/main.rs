//! keycmp CLI
//!
//! Command-line interface for comparing keyed JSON collections

use clap::{Parser, Subcommand};
use keycmp_core::errors::{CmpError, ExError, ExErrorKind};
use keycmp_core::logging_facility::{self, Profile};
use keycmp_core_types::RequestContext;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod fields;

#[derive(Debug, Parser)]
#[command(name = "keycmp")]
#[command(about = "keycmp - Keyed collection comparison", long_about = None)]
struct Cli {
    /// Config file (default: keycmp.toml in the current directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logging profile: development, production or test
    #[arg(long, global = true, env = "KEYCMP_LOG_PROFILE")]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two JSON arrays by key
    Diff(commands::diff::DiffArgs),
    /// Check that every item of a JSON array has a distinct key
    Check(commands::check::CheckArgs),
    /// Compare two JSON items
    Equals(commands::equals::EqualsArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Diff(_) => "diff",
            Commands::Check(_) => "check",
            Commands::Equals(_) => "equals",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let file_config = match config::load(cli.config.as_deref()) {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(commands::EXIT_ERROR);
        }
    };

    let profile = cli
        .log_profile
        .or(file_config.log_profile)
        .unwrap_or(Profile::Development);
    logging_facility::init(profile);

    let ctx = RequestContext::new().for_command(cli.command.name());
    tracing::info!(
        request_id = %ctx.request_id,
        command = cli.command.name(),
        "command started"
    );

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args, &file_config),
        Commands::Check(args) => commands::check::execute(args, &file_config),
        Commands::Equals(args) => commands::equals::execute(args, &file_config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", describe(&e, &ctx));
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}

/// Render a failure with its stable error code and the request id
fn describe(err: &anyhow::Error, ctx: &RequestContext) -> String {
    let kind = if let Some(cmp_err) = err.downcast_ref::<CmpError>() {
        ExError::from(cmp_err.clone()).kind()
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        ExErrorKind::Io
    } else if err.downcast_ref::<serde_json::Error>().is_some() {
        ExErrorKind::Serialization
    } else {
        return format!("{:#}", err);
    };

    ExError::new(kind)
        .with_op(ctx.command.as_deref().unwrap_or("keycmp"))
        .with_request_id(ctx.request_id.clone())
        .with_message(format!("{:#}", err))
        .to_string()
}
