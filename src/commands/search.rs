use clap::Args;
use serde::Serialize;

use cmdforge::{defaults, search};

use super::catalog::{summarize, CategorySummary};
use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive text matched against subcommand names and descriptions
    #[arg(default_value = "")]
    pub term: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    command: String,
    term: String,
    match_count: usize,
    categories: Vec<CategorySummary>,
}

pub fn run(args: SearchArgs, global: &GlobalArgs) -> CmdResult<SearchOutput> {
    let config = defaults::load_config();
    let catalog = global.load_catalog(&config)?;
    let filtered = search::filter(&catalog, &args.term);

    Ok((
        SearchOutput {
            command: "search".to_string(),
            term: args.term,
            match_count: filtered.command_count(),
            categories: summarize(&filtered),
        },
        0,
    ))
}
