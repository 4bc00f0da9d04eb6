//! Diff command
//!
//! Usage: keycmp diff <BASE> <WORKING> --key <FIELD> [--field <FIELD>]... [--format human|json]

use crate::commands::{load_items, EXIT_CHANGES, EXIT_CLEAN};
use crate::config::{FileConfig, OutputFormat};
use crate::fields::{self, FieldPath};
use clap::Args;
use keycmp_core::errors::CmpError;
use keycmp_core::{compare_with_rule, render_human_summary, EqualsRule};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Base JSON file (array of objects)
    pub base: PathBuf,

    /// Working JSON file (array of objects)
    pub working: PathBuf,

    /// Key field: member name or JSON pointer (`/a/b`)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Key field of working items, when it differs from `--key`
    #[arg(long)]
    pub working_key: Option<String>,

    /// Field to compare on matched items (repeatable; default: whole item)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit 0 even when changes are found
    #[arg(long)]
    pub no_fail: bool,
}

/// Settings after merging flags over the config file
#[derive(Debug)]
struct DiffSettings {
    base_key: FieldPath,
    working_key: FieldPath,
    fields: Vec<FieldPath>,
    format: OutputFormat,
}

fn resolve(args: &DiffArgs, config: &FileConfig) -> Result<DiffSettings, CmpError> {
    let key = args
        .key
        .as_deref()
        .or(config.key.as_deref())
        .ok_or_else(|| CmpError::InvalidArgument {
            reason: "no key field: pass --key or set `key` in keycmp.toml".to_string(),
        })?;
    let base_key = FieldPath::parse(key)?;
    let working_key = match args.working_key.as_deref().or(config.working_key.as_deref()) {
        Some(raw) => FieldPath::parse(raw)?,
        None => base_key.clone(),
    };

    let raw_fields = if args.fields.is_empty() {
        &config.fields
    } else {
        &args.fields
    };

    Ok(DiffSettings {
        base_key,
        working_key,
        fields: fields::parse_all(raw_fields)?,
        format: args.format.or(config.format).unwrap_or_default(),
    })
}

/// Execute diff command
pub fn execute(args: DiffArgs, config: &FileConfig) -> anyhow::Result<ExitCode> {
    let settings = resolve(&args, config)?;
    tracing::debug!(
        base_key = %settings.base_key,
        working_key = %settings.working_key,
        field_count = settings.fields.len(),
        "diff settings resolved"
    );

    let base = load_items(&args.base)?;
    let working = load_items(&args.working)?;
    settings
        .base_key
        .require_in(&args.base.display().to_string(), &base)?;
    settings
        .working_key
        .require_in(&args.working.display().to_string(), &working)?;

    let rule: EqualsRule<Value, Value> = fields::field_equals(settings.fields)?.into();
    let base_key = &settings.base_key;
    let working_key = &settings.working_key;
    let result = compare_with_rule(
        &base,
        &working,
        |item: &Value| base_key.key_of(item),
        |item: &Value| working_key.key_of(item),
        rule,
    )?;

    match settings.format {
        OutputFormat::Human => print!("{}", render_human_summary(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    let code = if result.has_changes() && !args.no_fail {
        EXIT_CHANGES
    } else {
        EXIT_CLEAN
    };
    Ok(ExitCode::from(code))
}
