use clap::{Args, Subcommand};
use serde::Serialize;

use cmdforge::defaults;
use cmdforge::{Catalog, Category, CommandView};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// List categories and their subcommands
    List,
    /// Show a category, or one subcommand with its input fields
    Show {
        /// Category name (e.g. git)
        category: String,
        /// Subcommand name (e.g. clone)
        subcommand: Option<String>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    name: String,
    subcommands: Vec<SubcommandSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcommandSummary {
    name: String,
    description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<CategorySummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<CommandView>,
}

pub fn run(args: CatalogArgs, global: &GlobalArgs) -> CmdResult<CatalogOutput> {
    let config = defaults::load_config();
    let catalog = global.load_catalog(&config)?;

    match args.command {
        CatalogCommand::List => list(&catalog),
        CatalogCommand::Show {
            category,
            subcommand: None,
        } => show_category(&catalog, &category),
        CatalogCommand::Show {
            category,
            subcommand: Some(subcommand),
        } => show_command(&catalog, &category, &subcommand),
    }
}

fn summarize_category(category: &Category) -> CategorySummary {
    CategorySummary {
        name: category.name.clone(),
        subcommands: category
            .commands
            .iter()
            .map(|entry| SubcommandSummary {
                name: entry.name.clone(),
                description: entry.record.description.clone(),
            })
            .collect(),
    }
}

/// Summaries for every category of `catalog`, in display order.
pub(crate) fn summarize(catalog: &Catalog) -> Vec<CategorySummary> {
    catalog.iter().map(summarize_category).collect()
}

fn list(catalog: &Catalog) -> CmdResult<CatalogOutput> {
    Ok((
        CatalogOutput {
            command: "catalog.list".to_string(),
            categories: Some(summarize(catalog)),
            command_count: Some(catalog.command_count()),
            detail: None,
        },
        0,
    ))
}

fn show_category(catalog: &Catalog, category: &str) -> CmdResult<CatalogOutput> {
    let summary = summarize_category(catalog.category(category)?);

    Ok((
        CatalogOutput {
            command: "catalog.show".to_string(),
            command_count: Some(summary.subcommands.len()),
            categories: Some(vec![summary]),
            detail: None,
        },
        0,
    ))
}

fn show_command(catalog: &Catalog, category: &str, subcommand: &str) -> CmdResult<CatalogOutput> {
    let view = CommandView::resolve(catalog, category, subcommand)?;

    Ok((
        CatalogOutput {
            command: "catalog.show".to_string(),
            categories: None,
            command_count: None,
            detail: Some(view),
        },
        0,
    ))
}
