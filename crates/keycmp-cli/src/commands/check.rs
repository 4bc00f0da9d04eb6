//! Check command
//!
//! Usage: keycmp check <INPUT> --key <FIELD>

use crate::commands::{load_items, EXIT_CLEAN, EXIT_ERROR};
use crate::config::FileConfig;
use crate::fields::FieldPath;
use clap::Args;
use keycmp_core::errors::CmpError;
use keycmp_core::partition_labeled;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSON file (array of objects)
    pub input: PathBuf,

    /// Key field: member name or JSON pointer (`/a/b`)
    #[arg(short, long)]
    pub key: Option<String>,
}

/// Execute check command
///
/// Prints `ok` when every item has a distinct key, otherwise the collision.
pub fn execute(args: CheckArgs, config: &FileConfig) -> anyhow::Result<ExitCode> {
    let raw_key = args
        .key
        .as_deref()
        .or(config.key.as_deref())
        .ok_or_else(|| CmpError::InvalidArgument {
            reason: "no key field: pass --key or set `key` in keycmp.toml".to_string(),
        })?;
    let key = FieldPath::parse(raw_key)?;
    let items = load_items(&args.input)?;
    let label = args.input.display().to_string();
    key.require_in(&label, &items)?;

    match partition_labeled(&label, &items, |item: &Value| key.key_of(item)) {
        Ok(_) => {
            println!("ok");
            Ok(ExitCode::from(EXIT_CLEAN))
        }
        Err(collision) => {
            println!("{}", collision);
            Ok(ExitCode::from(EXIT_ERROR))
        }
    }
}
