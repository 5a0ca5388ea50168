//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `browse`: library statistics and sorted listings
//! - `search`: sectioned search results
//! - `settings`: effective configuration

mod browse;
mod search;
mod settings;

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::config::{self, Config};
use crate::library::{Library, LoadOutcome, MusicStore};
use crate::search::DisplayMode;
use crate::sort::SortMode;
use crate::source::{self, SongSource};

pub use browse::{cmd_list, cmd_stats};
pub use search::cmd_search;
pub use settings::cmd_config;

/// Music Shelf CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Music directory or JSON row file (repeatable; overrides the config)
    #[arg(short, long = "source", global = true, env = "MUSIC_SHELF_SOURCE")]
    pub sources: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show how many songs, albums, artists and genres were found
    Stats,
    /// List one kind of entity in sorted order
    List {
        /// What to list
        kind: DisplayMode,
        /// Sort mode (default: from config)
        #[arg(short = 'o', long)]
        sort: Option<SortMode>,
    },
    /// Search the library, ignoring case and accents
    Search {
        /// Text to look for
        query: String,
        /// Only search one kind (default: from config)
        #[arg(short, long, conflicts_with = "all")]
        filter: Option<DisplayMode>,
        /// Search every kind, ignoring the configured filter
        #[arg(long)]
        all: bool,
        /// Remember the filter in the config file
        #[arg(long)]
        save_filter: bool,
    },
    /// Print the effective configuration
    Config,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        Commands::Stats => cmd_stats(&rt, cli, &config),
        Commands::List { kind, sort } => cmd_list(&rt, cli, &config, *kind, *sort),
        Commands::Search {
            query,
            filter,
            all,
            save_filter,
        } => {
            let filter = if *all { None } else { filter.or(config.search.filter) };
            cmd_search(&rt, cli, config.clone(), query, filter, *save_filter)
        }
        Commands::Config => cmd_config(cli, &config),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Sources named on the command line, else the configured ones.
pub(crate) fn collect_sources(cli: &Cli, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let paths = if cli.sources.is_empty() {
        config.library.sources.clone()
    } else {
        cli.sources.clone()
    };
    if paths.is_empty() {
        bail!("No music sources: pass --source PATH or set [library] sources in the config");
    }
    Ok(paths)
}

/// Load every source into `store`.
///
/// Returns `None` (after telling the user) when no music was found.
pub(crate) fn load_library(
    rt: &Runtime,
    store: &MusicStore,
    cli: &Cli,
    config: &Config,
) -> anyhow::Result<Option<Arc<Library>>> {
    let paths = collect_sources(cli, config)?;
    debug!(sources = paths.len(), "Loading library");

    let sources: Vec<Box<dyn SongSource + Send>> = paths
        .iter()
        .map(|path| source::open(path, config.library.recursive))
        .collect();

    match rt.block_on(store.load(sources))? {
        LoadOutcome::Loaded(library) => {
            info!(songs = library.songs().len(), "Library ready");
            Ok(Some(library))
        }
        LoadOutcome::NoMusic => {
            println!("No music found.");
            Ok(None)
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
    fn test_parse_list_with_sort() {
        let cli = Cli::try_parse_from([
            "music-shelf",
            "--source",
            "/music",
            "list",
            "albums",
            "--sort",
            "numeric-desc",
        ])
        .unwrap();

        assert_eq!(cli.sources, vec![PathBuf::from("/music")]);
        assert!(matches!(
            cli.command,
            Commands::List {
                kind: DisplayMode::Albums,
                sort: Some(SortMode::NumericDescending)
            }
        ));
    }

    #[test]
    fn test_parse_search_filter() {
        let cli =
            Cli::try_parse_from(["music-shelf", "search", "cafe", "--filter", "artists"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Search {
                filter: Some(DisplayMode::Artists),
                all: false,
                ..
            }
        ));

        let conflict =
            Cli::try_parse_from(["music-shelf", "search", "x", "--filter", "songs", "--all"]);
        assert!(conflict.is_err());
    }

    #[test]
    fn test_sources_fall_back_to_config() {
        let cli = Cli::try_parse_from(["music-shelf", "stats"]).unwrap();
        let mut config = Config::default();
        assert!(collect_sources(&cli, &config).is_err());

        config.library.sources = vec![PathBuf::from("/configured")];
        assert_eq!(
            collect_sources(&cli, &config).unwrap(),
            vec![PathBuf::from("/configured")]
        );
    }
}
