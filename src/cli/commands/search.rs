//! Search command.

use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

use crate::config::{self, Config};
use crate::library::{Library, MusicStore};
use crate::music::MusicId;
use crate::search::{DisplayMode, SearchItem, Searcher};
use crate::strings::Strings;

use super::{Cli, load_library};

/// Search the library and print sectioned results
pub fn cmd_search(
    rt: &Runtime,
    cli: &Cli,
    mut config: Config,
    query: &str,
    filter: Option<DisplayMode>,
    save_filter: bool,
) -> anyhow::Result<()> {
    if save_filter {
        config.search.filter = filter;
        match &cli.config {
            Some(path) => config::save_to(&config, path)?,
            None => rt.block_on(config::save_async(config.clone()))?,
        }
        info!(?filter, "Saved search filter");
    }

    let store = Arc::new(MusicStore::new());
    if load_library(rt, &store, cli, &config)?.is_none() {
        return Ok(());
    }

    let strings = Arc::new(config.strings.clone());
    let searcher = Searcher::new(Arc::clone(&store), strings.clone(), filter);

    rt.block_on(async {
        if let Some(handle) = searcher.search(Some(query)) {
            handle.await?;
        }
        Ok::<_, anyhow::Error>(())
    })?;

    let results = searcher.results();
    let Some(library) = results.library.as_deref() else {
        println!("No results.");
        return Ok(());
    };
    for line in result_lines(library, &results.items, strings.as_ref()) {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn result_lines(
    library: &Library,
    items: &[SearchItem],
    strings: &dyn Strings,
) -> Vec<String> {
    if items.is_empty() {
        return vec!["No results.".to_string()];
    }

    items
        .iter()
        .map(|item| match *item {
            SearchItem::Header(header) => format!("== {} ==", header.label()),
            SearchItem::Music(id @ MusicId::Song(song)) => format!(
                "  {} - {}",
                library.resolve_name(id, strings),
                library
                    .song(song)
                    .resolve_individual_artist_name(library, strings)
            ),
            SearchItem::Music(id) => format!("  {}", library.resolve_name(id, strings)),
        })
        .collect()
}
