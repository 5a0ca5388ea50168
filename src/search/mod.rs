//! Diacritic-insensitive search over a library snapshot.
//!
//! Results are sectioned by kind in a fixed order (artists, albums, genres,
//! songs), each section introduced by a [`Header`]. Sections without matches
//! are left out entirely.
//!
//! [`search_library`] is the synchronous core; [`Searcher`] runs it off the
//! caller's thread and publishes only the newest result.

mod searcher;

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::library::Library;
use crate::music::{AlbumId, ArtistId, GenreId, MusicId, SongId};
use crate::sort::{Sort, SortMode};
use crate::strings::Strings;
use crate::text::normalize;

pub use searcher::{SearchResults, Searcher};

/// Entity kind, used as a search filter and for section headers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Songs,
    Albums,
    Artists,
    Genres,
}

impl DisplayMode {
    /// Section title.
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Songs => "Songs",
            DisplayMode::Albums => "Albums",
            DisplayMode::Artists => "Artists",
            DisplayMode::Genres => "Genres",
        }
    }

    /// Fixed id of this kind's section header.
    pub fn header_id(self) -> i64 {
        match self {
            DisplayMode::Artists => -1,
            DisplayMode::Albums => -2,
            DisplayMode::Genres => -3,
            DisplayMode::Songs => -4,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Section header in a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: i64,
    pub kind: DisplayMode,
}

impl Header {
    pub fn new(kind: DisplayMode) -> Self {
        Self {
            id: kind.header_id(),
            kind,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// One row of a sectioned result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchItem {
    Header(Header),
    Music(MusicId),
}

/// Form of a name used for matching: lowercased, then stripped of marks.
fn search_key(name: &str) -> String {
    normalize(&name.to_lowercase())
}

/// Search `library` for entities whose display name contains `query`.
///
/// Matching ignores case and diacritics, so "cafe" finds "Café". An empty
/// query yields no results. `filter` restricts the search to one kind.
/// Artists, albums and genres are ordered by name; songs keep library order.
pub fn search_library(
    library: &Library,
    query: &str,
    filter: Option<DisplayMode>,
    strings: &dyn Strings,
) -> Vec<SearchItem> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = search_key(query);
    let wanted = |kind: DisplayMode| filter.is_none_or(|f| f == kind);
    let matches =
        |id: MusicId| search_key(&library.resolve_name(id, strings)).contains(needle.as_str());
    let by_name = Sort::new(library, SortMode::AlphaAscending);
    let mut results = Vec::new();

    if wanted(DisplayMode::Artists) {
        let artists: Vec<ArtistId> = (0..library.artists().len())
            .into_par_iter()
            .map(ArtistId)
            .filter(|&id| matches(id.into()))
            .collect();
        push_section(&mut results, DisplayMode::Artists, by_name.artists(&artists));
    }

    if wanted(DisplayMode::Albums) {
        let albums: Vec<AlbumId> = (0..library.albums().len())
            .into_par_iter()
            .map(AlbumId)
            .filter(|&id| matches(id.into()))
            .collect();
        push_section(&mut results, DisplayMode::Albums, by_name.albums(&albums));
    }

    if wanted(DisplayMode::Genres) {
        let genres: Vec<GenreId> = (0..library.genres().len())
            .into_par_iter()
            .map(GenreId)
            .filter(|&id| matches(id.into()))
            .collect();
        push_section(&mut results, DisplayMode::Genres, by_name.genres(&genres));
    }

    if wanted(DisplayMode::Songs) {
        let songs: Vec<SongId> = (0..library.songs().len())
            .into_par_iter()
            .map(SongId)
            .filter(|&id| matches(id.into()))
            .collect();
        push_section(&mut results, DisplayMode::Songs, songs);
    }

    debug!(
        query,
        ?filter,
        results = results.len(),
        "Search complete"
    );
    results
}

fn push_section<I: Into<MusicId>>(results: &mut Vec<SearchItem>, kind: DisplayMode, ids: Vec<I>) {
    if ids.is_empty() {
        return;
    }
    results.push(SearchItem::Header(Header::new(kind)));
    results.extend(ids.into_iter().map(|id| SearchItem::Music(id.into())));
}
