//! Library statistics and sorted listings.

use tokio::runtime::Runtime;
use tracing::warn;

use crate::config::Config;
use crate::library::{Library, MusicStore};
use crate::search::DisplayMode;
use crate::sort::{Sort, SortMode};
use crate::strings::{CountKind, Strings};

use super::{Cli, load_library};

/// Print entity counts
pub fn cmd_stats(rt: &Runtime, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let store = MusicStore::new();
    let Some(library) = load_library(rt, &store, cli, config)? else {
        return Ok(());
    };

    for line in stats_lines(&library, &config.strings) {
        println!("{}", line);
    }
    Ok(())
}

/// Print one kind of entity, sorted
pub fn cmd_list(
    rt: &Runtime,
    cli: &Cli,
    config: &Config,
    kind: DisplayMode,
    sort: Option<SortMode>,
) -> anyhow::Result<()> {
    let mode = sort.unwrap_or(match kind {
        DisplayMode::Songs => config.sort.songs,
        DisplayMode::Albums => config.sort.albums,
        DisplayMode::Artists => config.sort.artists,
        DisplayMode::Genres => config.sort.genres,
    });
    if !mode.applies_to(kind) {
        warn!(%mode, %kind, "Sort mode does not apply, keeping library order");
    }

    let store = MusicStore::new();
    let Some(library) = load_library(rt, &store, cli, config)? else {
        return Ok(());
    };

    for line in listing_lines(&library, kind, mode, &config.strings) {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn stats_lines(library: &Library, strings: &dyn Strings) -> Vec<String> {
    vec![
        strings.count(CountKind::Songs, library.songs().len()),
        strings.count(CountKind::Albums, library.albums().len()),
        strings.count(CountKind::Artists, library.artists().len()),
        strings.count(CountKind::Genres, library.genres().len()),
    ]
}

pub(crate) fn listing_lines(
    library: &Library,
    kind: DisplayMode,
    mode: SortMode,
    strings: &dyn Strings,
) -> Vec<String> {
    let sort = Sort::new(library, mode);

    match kind {
        DisplayMode::Songs => {
            let ids: Vec<_> = library.song_ids().collect();
            sort.songs(&ids)
                .into_iter()
                .map(|id| {
                    let song = library.song(id);
                    let track = song.track.map(|t| format!("{:>3}. ", t)).unwrap_or_default();
                    format!(
                        "{}{} - {} [{}]",
                        track,
                        song.resolve_name(),
                        song.resolve_individual_artist_name(library, strings),
                        crate::text::format_duration(song.seconds())
                    )
                })
                .collect()
        }
        DisplayMode::Albums => {
            let ids: Vec<_> = library.album_ids().collect();
            sort.albums(&ids)
                .into_iter()
                .map(|id| {
                    let album = library.album(id);
                    let year = album.year.map(|y| format!(" ({})", y)).unwrap_or_default();
                    format!(
                        "{}{} - {}, {} [{}]",
                        album.resolve_name(),
                        year,
                        library.artist(album.artist()).resolve_name(strings),
                        strings.count(CountKind::Songs, album.songs().len()),
                        album.total_duration(library)
                    )
                })
                .collect()
        }
        DisplayMode::Artists => {
            let ids: Vec<_> = library.artist_ids().collect();
            sort.artists(&ids)
                .into_iter()
                .map(|id| {
                    let artist = library.artist(id);
                    format!(
                        "{} - {}, {}",
                        artist.resolve_name(strings),
                        strings.count(CountKind::Albums, artist.albums().len()),
                        strings.count(CountKind::Songs, artist.song_count(library))
                    )
                })
                .collect()
        }
        DisplayMode::Genres => {
            let ids: Vec<_> = library.genre_ids().collect();
            sort.genres(&ids)
                .into_iter()
                .map(|id| {
                    let genre = library.genre(id);
                    format!(
                        "{} - {} [{}]",
                        genre.resolve_name(strings),
                        strings.count(CountKind::Songs, genre.songs().len()),
                        genre.total_duration(library)
                    )
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StringsConfig;
    use crate::music::RawSong;
    use crate::test_utils::{build, raw_song};

    fn library() -> Library {
        build(vec![
            RawSong {
                track: Some(2),
                year: Some(1971),
                genre: Some("(17)".to_string()),
                ..raw_song("Dirty Love", "Blue", "Joni Mitchell")
            },
            RawSong {
                track: Some(1),
                year: Some(1971),
                ..raw_song("All I Want", "Blue", "Joni Mitchell")
            },
        ])
    }

    #[test]
    fn test_stats_lines() {
        let strings = StringsConfig::default();
        assert_eq!(
            stats_lines(&library(), &strings),
            vec!["2 songs", "1 album", "1 artist", "2 genres"]
        );
    }

    #[test]
    fn test_song_listing_by_track() {
        let strings = StringsConfig::default();
        let lines = listing_lines(
            &library(),
            DisplayMode::Songs,
            SortMode::NumericAscending,
            &strings,
        );
        assert_eq!(
            lines,
            vec![
                "  1. All I Want - Joni Mitchell [3:00]",
                "  2. Dirty Love - Joni Mitchell [3:00]",
            ]
        );
    }

    #[test]
    fn test_album_listing() {
        let strings = StringsConfig::default();
        let lines = listing_lines(
            &library(),
            DisplayMode::Albums,
            SortMode::AlphaAscending,
            &strings,
        );
        assert_eq!(lines, vec!["Blue (1971) - Joni Mitchell, 2 songs [6:00]"]);
    }

    #[test]
    fn test_genre_listing_uses_fallbacks() {
        let strings = StringsConfig::default();
        let lines = listing_lines(
            &library(),
            DisplayMode::Genres,
            SortMode::AlphaAscending,
            &strings,
        );
        assert_eq!(
            lines,
            vec!["Rock - 1 song [3:00]", "Unknown Genre - 1 song [3:00]"]
        );
    }
}
