use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;

use commands::{catalog, config, generate, history, search};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "cmdforge")]
#[command(version = VERSION)]
#[command(about = "Build shell commands from a catalog of parameterized templates")]
struct Cli {
    /// Catalog file to use instead of the configured or built-in catalog
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Browse command categories and templates
    Catalog(catalog::CatalogArgs),
    /// Filter the catalog by name or description
    Search(search::SearchArgs),
    /// Fill a template's placeholders and print the command
    #[command(visible_alias = "gen")]
    Generate(generate::GenerateArgs),
    /// Recently generated commands
    History(history::HistoryArgs),
    /// Manage global cmdforge configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Generate(args) if args.raw => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        catalog: cli.catalog,
    };

    if let ResponseMode::Raw = response_mode(&cli.command) {
        return match commands::run_raw(cli.command, &global) {
            Ok((content, exit_code)) => {
                println!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let (json_result, exit_code) = output::map_cmd_result_to_json::<()>(Err(err));
                let _ = output::print_json_result(json_result);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
