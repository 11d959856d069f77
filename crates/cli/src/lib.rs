pub mod bootstrap;
pub mod commands;

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wardrobe_core::config::{AppConfig, LoadOptions, LogFormat};

use crate::commands::favorites::FavoriteCommand;
use crate::commands::history::HistoryCommand;
use crate::commands::items::ItemCommand;
use crate::commands::suggest::SuggestArgs;
use crate::commands::wear::WearArgs;
use crate::commands::weekly::WeeklyCommand;

#[derive(Debug, Parser)]
#[command(
    name = "wardrobe",
    about = "Wardrobe catalog and outfit recommendation CLI",
    long_about = "Catalog shirts and pants, get scored outfit suggestions, keep a weekly pick, \
                  and track what you wore.",
    after_help = "Examples:\n  wardrobe seed\n  wardrobe suggest --occasion casual\n  \
                  wardrobe weekly show\n  wardrobe doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand, about = "Add, list, update and delete clothing items")]
    Item(ItemCommand),
    #[command(about = "List scored outfit suggestions, optionally filtered")]
    Suggest(SuggestArgs),
    #[command(subcommand, about = "Show, regenerate or pick the outfit of the week")]
    Weekly(WeeklyCommand),
    #[command(about = "Record that an outfit was worn")]
    Wear(WearArgs),
    #[command(subcommand, about = "Inspect and edit the wear history")]
    History(HistoryCommand),
    #[command(subcommand, about = "Manage favorite outfits")]
    Favorite(FavoriteCommand),
    #[command(about = "Print the catalog, history, favorites and weekly pick as JSON")]
    Export,
    #[command(about = "Load the deterministic demo wardrobe")]
    Seed,
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, DB connectivity and storage readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Logging needs a config; a broken one is reported by the command itself.
    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    if let Err(error) = init_logging(&config) {
        eprintln!("logging disabled: {error}");
    }

    let result = match cli.command {
        Command::Item(command) => commands::items::run(command),
        Command::Suggest(args) => commands::suggest::run(args),
        Command::Weekly(command) => commands::weekly::run(command),
        Command::Wear(args) => commands::wear::run(args),
        Command::History(command) => commands::history::run(command),
        Command::Favorite(command) => commands::favorites::run(command),
        Command::Export => commands::export::run(),
        Command::Seed => commands::seed::run(),
        Command::Migrate => commands::migrate::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a single JSON document per command.
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};
    use crate::commands::history::HistoryCommand;
    use crate::commands::items::ItemCommand;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn item_add_parses_labels() {
        let cli = Cli::try_parse_from([
            "wardrobe", "item", "add", "--name", "Oxford", "--category", "shirt", "--color",
            "white", "--type", "formal", "--fabric", "cotton",
        ])
        .expect("parse");

        assert!(matches!(cli.command, Command::Item(ItemCommand::Add(_))));
    }

    #[test]
    fn wear_rating_is_bounded() {
        assert!(Cli::try_parse_from(["wardrobe", "wear", "a-b", "--rating", "6"]).is_err());
        assert!(Cli::try_parse_from(["wardrobe", "wear", "a-b", "--rating", "5"]).is_ok());
    }

    #[test]
    fn history_range_requires_both_bounds() {
        assert!(Cli::try_parse_from(["wardrobe", "history", "range", "--from", "2024-03-01"])
            .is_err());
        let cli = Cli::try_parse_from([
            "wardrobe", "history", "range", "--from", "2024-03-01", "--to", "2024-03-31",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Command::History(HistoryCommand::Range { .. })));
    }
}
