use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use cmdforge::{defaults, Field, HistoryRing, Session};

use super::{history, parse_kv_flags, parse_param_pairs, CmdResult, GlobalArgs};

#[derive(Args)]
pub struct GenerateArgs {
    /// Category name (e.g. docker)
    pub category: String,

    /// Subcommand name (defaults to the category's first subcommand)
    pub subcommand: Option<String>,

    /// Placeholder value as NAME=VALUE (repeatable)
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Print only the rendered command instead of the JSON envelope
    #[arg(long)]
    pub raw: bool,

    /// Render without recording the command in history
    #[arg(long)]
    pub no_history: bool,

    /// Placeholder values as `--name value` pairs after a `--` separator:
    /// `cmdforge generate git clone -- --repository URL --directory DIR`
    #[arg(last = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub command: String,
    pub category: String,
    pub subcommand: String,
    pub rendered: String,
    pub complete: bool,
    pub unresolved: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
    pub fields: Vec<Field>,
    pub in_history: bool,
}

pub fn run(args: GenerateArgs, global: &GlobalArgs) -> CmdResult<GenerateOutput> {
    let config = defaults::load_config();
    let catalog = Arc::new(global.load_catalog(&config)?);

    let mut values = parse_param_pairs(&args.params)?;
    values.extend(parse_kv_flags(&args.extra)?);

    let ring = if args.no_history {
        HistoryRing::new(config.defaults.history.capacity)
    } else {
        history::load_persisted(&config)
    };

    let mut session = Session::new(catalog)
        .with_history(ring)
        .with_policy(config.defaults.render.unresolved);

    let view = match args.subcommand.as_deref() {
        Some(subcommand) => session.select(&args.category, subcommand)?,
        None => session.select_category(&args.category)?,
    };

    let mut ignored = Vec::new();
    for (name, value) in values {
        if !view.fields.iter().any(|field| field.name == name) {
            ignored.push(name.clone());
        }
        session.set(name, value);
    }
    if !ignored.is_empty() {
        cmdforge::log_status!(
            "generate",
            "No placeholder named {} in '{} {}'",
            ignored.join(", "),
            view.category,
            view.subcommand
        );
    }

    let output = if args.no_history {
        session.preview()?
    } else {
        let output = session.generate()?;
        history::persist(&config, session.history());
        output
    };

    if !output.is_complete() {
        cmdforge::log_status!(
            "generate",
            "Unresolved placeholders: {}",
            output.unresolved.join(", ")
        );
    }

    Ok((
        GenerateOutput {
            command: "generate".to_string(),
            in_history: session.history().contains(&output.command),
            category: view.category,
            subcommand: view.subcommand,
            complete: output.is_complete(),
            rendered: output.command,
            unresolved: output.unresolved,
            ignored,
            fields: view.fields,
        },
        0,
    ))
}
