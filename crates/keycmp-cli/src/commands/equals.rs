//! Equals command
//!
//! Usage: keycmp equals <LEFT> <RIGHT> [--field <FIELD>]...

use crate::commands::{load_json, EXIT_CHANGES, EXIT_CLEAN};
use crate::config::FileConfig;
use crate::fields;
use clap::Args;
use keycmp_core::objects_equal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct EqualsArgs {
    /// Left JSON file (one item)
    pub left: PathBuf,

    /// Right JSON file (one item)
    pub right: PathBuf,

    /// Field to compare (repeatable; default: whole item)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
}

/// Execute equals command
pub fn execute(args: EqualsArgs, config: &FileConfig) -> anyhow::Result<ExitCode> {
    let raw_fields = if args.fields.is_empty() {
        &config.fields
    } else {
        &args.fields
    };
    let equals = fields::field_equals(fields::parse_all(raw_fields)?)?;

    let left = load_json(&args.left)?;
    let right = load_json(&args.right)?;

    if objects_equal(&left, &right, equals) {
        println!("equal");
        Ok(ExitCode::from(EXIT_CLEAN))
    } else {
        println!("different");
        Ok(ExitCode::from(EXIT_CHANGES))
    }
}
