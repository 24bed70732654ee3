//! Design Bookshelf CLI
//!
//! Command-line and terminal interface for browsing the design book catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use shelf_core::{Config, Session};

mod commands;
mod logging;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Design Bookshelf - browse a curated catalog of design books")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use an alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    #[command(flatten)]
    Catalog(CatalogCommands),
    /// About Design Bookshelf
    About,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Commands that run against an open catalog session
#[derive(Subcommand)]
enum CatalogCommands {
    /// List books in a view
    #[command(alias = "ls")]
    Books {
        /// Category label or slug (e.g. "UX Design" or ux-design)
        #[arg(short, long)]
        category: Option<String>,
        /// Only favorited books
        #[arg(short, long)]
        favorites: bool,
    },
    /// Show book details
    Show {
        /// Book ID or title prefix
        id: String,
    },
    /// Open a book's purchase link in the browser
    Open {
        /// Book ID or title prefix
        id: String,
    },
    /// List categories with counts
    Categories,
    /// Toggle a book as favorite
    #[command(alias = "fav")]
    Favorite {
        /// Book ID or title prefix
        id: String,
    },
    /// List favorite books
    Favorites,
    /// Resolve a deep link such as /category/ux-design
    Route {
        /// Path to resolve
        path: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, dataset_path, favorites_key, analytics, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    match cli.command {
        Some(Commands::Config { command }) => {
            handle_config_command(command, config_path, &output)
        }
        Some(Commands::About) => commands::about::show(&output),
        None | Some(Commands::Tui) => tui::run(&load_config(config_path)?),
        Some(Commands::Catalog(command)) => {
            let config = load_config(config_path)?;
            logging::init_cli_logging(&config);
            handle_catalog_command(command, &config, &output)
        }
    }
}

fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    Config::load_with_cli_override(config_path).context("Failed to load configuration")
}

fn handle_catalog_command(
    command: CatalogCommands,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let mut session = Session::open(config)?;

    match command {
        CatalogCommands::Books {
            category,
            favorites,
        } => commands::book::list(&mut session, category, favorites, output),
        CatalogCommands::Show { id } => commands::book::show(&session, id, output),
        CatalogCommands::Open { id } => commands::book::open(&session, id, output),
        CatalogCommands::Categories => commands::category::list(&session, output),
        CatalogCommands::Favorite { id } => {
            commands::favorite::toggle(&mut session, id, output)
        }
        CatalogCommands::Favorites => commands::favorite::list(&session, output),
        CatalogCommands::Route { path } => {
            commands::route::resolve(&mut session, path, output)
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_catalog_commands_parse_at_top_level() {
        let cli = Cli::try_parse_from(["shelf", "ls", "--category", "ux-design"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Catalog(CatalogCommands::Books {
                category: Some(ref c),
                favorites: false,
            })) if c == "ux-design"
        ));

        let cli = Cli::try_parse_from(["shelf", "fav", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Catalog(CatalogCommands::Favorite { ref id })) if id == "3"
        ));
    }

    #[test]
    fn test_non_catalog_commands_stay_separate() {
        let cli = Cli::try_parse_from(["shelf", "about"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::About)));

        let cli = Cli::try_parse_from(["shelf", "config", "set", "analytics", "true"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: Some(ConfigCommands::Set { .. })
            })
        ));

        let cli = Cli::try_parse_from(["shelf"]).unwrap();
        assert!(cli.command.is_none());
    }
}
