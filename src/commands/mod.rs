use serde_json::Value;

use cmdforge::defaults::CmdforgeConfig;
use cmdforge::Catalog;

use crate::output;
use crate::Commands;

pub type CmdResult<T> = cmdforge::Result<(T, i32)>;

pub struct GlobalArgs {
    /// Catalog file overriding both config and the built-in catalog
    pub catalog: Option<String>,
}

impl GlobalArgs {
    pub fn load_catalog(&self, config: &CmdforgeConfig) -> cmdforge::Result<Catalog> {
        let path = self
            .catalog
            .as_deref()
            .or(config.defaults.catalog.path.as_deref());
        Catalog::resolve(path)
    }
}

// ============================================================================
// Parameter Input Parsing (CLI layer)
// ============================================================================

/// Parse repeated `NAME=VALUE` arguments. Only the first `=` splits, so
/// values may contain `=`.
pub(crate) fn parse_param_pairs(pairs: &[String]) -> cmdforge::Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                cmdforge::Error::validation_invalid_argument(
                    "param",
                    format!("Expected NAME=VALUE, got '{}'", pair),
                    Some(pair.clone()),
                    None,
                )
            })?;
            if name.is_empty() {
                return Err(cmdforge::Error::validation_invalid_argument(
                    "param",
                    "Parameter name cannot be empty",
                    Some(pair.clone()),
                    None,
                ));
            }
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Parse trailing `--name value` pairs. Values are kept as raw strings.
pub(crate) fn parse_kv_flags(extra: &[String]) -> cmdforge::Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut iter = extra.iter();

    while let Some(arg) = iter.next() {
        let key = arg.strip_prefix("--").ok_or_else(|| {
            cmdforge::Error::validation_invalid_argument(
                "extra",
                format!("Expected --name value, got '{}'", arg),
                Some(arg.clone()),
                None,
            )
        })?;
        let value = iter.next().ok_or_else(|| {
            cmdforge::Error::validation_invalid_argument(
                key,
                format!("Missing value for flag --{}", key),
                None,
                None,
            )
        })?;
        pairs.push((key.to_string(), value.clone()));
    }

    Ok(pairs)
}

pub(crate) fn run_json(command: Commands, global: &GlobalArgs) -> (cmdforge::Result<Value>, i32) {
    match command {
        Commands::Catalog(args) => output::map_cmd_result_to_json(catalog::run(args, global)),
        Commands::Search(args) => output::map_cmd_result_to_json(search::run(args, global)),
        Commands::Generate(args) => output::map_cmd_result_to_json(generate::run(args, global)),
        Commands::History(args) => output::map_cmd_result_to_json(history::run(args, global)),
        Commands::Config(args) => output::map_cmd_result_to_json(config::run(args, global)),
    }
}

/// Plain-text output for commands run with `--raw`.
pub(crate) fn run_raw(command: Commands, global: &GlobalArgs) -> CmdResult<String> {
    match command {
        Commands::Generate(args) => {
            let (out, exit_code) = generate::run(args, global)?;
            Ok((out.rendered, exit_code))
        }
        _ => Err(cmdforge::Error::validation_invalid_argument(
            "raw",
            "Raw output is only supported by 'generate'",
            None,
            None,
        )),
    }
}

pub mod catalog;
pub mod config;
pub mod generate;
pub mod history;
pub mod search;
