use clap::{Args, Subcommand};
use serde::Serialize;

use cmdforge::defaults::{self, CmdforgeConfig};
use cmdforge::history::{self as ring, HistoryRing};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List generated commands, newest first
    List,
    /// Show one entry by position (0 = newest)
    Show {
        index: usize,
    },
    /// Remove all entries
    Clear,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleared: Option<usize>,
    capacity: usize,
}

pub fn run(args: HistoryArgs, _global: &GlobalArgs) -> CmdResult<HistoryOutput> {
    let config = defaults::load_config();
    let history = load_persisted(&config);

    match args.command {
        HistoryCommand::List => list(&history),
        HistoryCommand::Show { index } => show(&history, index),
        HistoryCommand::Clear => clear(&config, history),
    }
}

/// History saved by previous invocations. Failures are logged and yield an
/// empty ring.
pub(crate) fn load_persisted(config: &CmdforgeConfig) -> HistoryRing {
    let capacity = config.defaults.history.capacity;
    if !config.defaults.history.persist {
        return HistoryRing::new(capacity);
    }

    match defaults::history_path().and_then(|path| ring::load_file(&path, capacity)) {
        Ok(history) => history,
        Err(err) => {
            cmdforge::log_status!("history", "Could not load history: {}", err.message);
            HistoryRing::new(capacity)
        }
    }
}

/// Save history for later invocations. Failures are logged, never returned.
pub(crate) fn persist(config: &CmdforgeConfig, history: &HistoryRing) {
    if !config.defaults.history.persist {
        return;
    }

    if let Err(err) = defaults::history_path().and_then(|path| ring::save_file(&path, history)) {
        cmdforge::log_status!("history", "Could not save history: {}", err.message);
    }
}

fn list(history: &HistoryRing) -> CmdResult<HistoryOutput> {
    Ok((
        HistoryOutput {
            command: "history.list".to_string(),
            entries: Some(history.entries().into_iter().map(String::from).collect()),
            entry: None,
            index: None,
            cleared: None,
            capacity: history.capacity(),
        },
        0,
    ))
}

fn show(history: &HistoryRing, index: usize) -> CmdResult<HistoryOutput> {
    let entry = history.get(index).ok_or_else(|| {
        cmdforge::Error::validation_invalid_argument(
            "index",
            format!("No history entry at position {} ({} stored)", index, history.len()),
            Some(index.to_string()),
            None,
        )
    })?;

    Ok((
        HistoryOutput {
            command: "history.show".to_string(),
            entries: None,
            entry: Some(entry.to_string()),
            index: Some(index),
            cleared: None,
            capacity: history.capacity(),
        },
        0,
    ))
}

fn clear(config: &CmdforgeConfig, mut history: HistoryRing) -> CmdResult<HistoryOutput> {
    let cleared = history.len();
    history.clear();

    if config.defaults.history.persist {
        ring::save_file(&defaults::history_path()?, &history)?;
    }

    Ok((
        HistoryOutput {
            command: "history.clear".to_string(),
            entries: None,
            entry: None,
            index: None,
            cleared: Some(cleared),
            capacity: history.capacity(),
        },
        0,
    ))
}
