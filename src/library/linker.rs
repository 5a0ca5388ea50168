//! Builds the linked library graph from raw rows.
//!
//! Songs are clustered into albums, albums into artists, and songs (again)
//! into genres. Every parent handle is decided before the child is
//! constructed, so each link is written exactly once.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, info};

use crate::music::{
    Album, AlbumId, Artist, ArtistId, CoverArt, Genre, GenreId, RawSong, Song, SongId, UNKNOWN,
};

use super::{Library, LoadOutcome};

/// Rows clustered under one album, before the album itself exists.
struct AlbumDraft {
    rows: Vec<usize>,
    grouping_artist_name: String,
}

/// Link a flat batch of rows into a [`Library`].
///
/// Never fails: fields missing from a row were already defaulted, and every
/// row has an album key (at worst the unknown artist with an empty album name).
/// An empty batch yields [`LoadOutcome::NoMusic`].
pub fn build_library(rows: Vec<RawSong>) -> LoadOutcome {
    if rows.is_empty() {
        info!("No rows to link");
        return LoadOutcome::NoMusic;
    }

    // Albums: lowercased (grouping artist, album name)
    let album_groups = group_by(rows.iter(), |row| {
        (
            row.grouping_artist_name().to_lowercase(),
            row.album.to_lowercase(),
        )
    });
    let drafts: Vec<AlbumDraft> = album_groups
        .into_iter()
        .map(|rows_in_album| AlbumDraft {
            grouping_artist_name: rows[rows_in_album[0]].grouping_artist_name().to_string(),
            rows: rows_in_album,
        })
        .collect();

    // Artists: lowercased grouping artist of each album
    let artist_groups = group_by(drafts.iter(), |draft| {
        draft.grouping_artist_name.to_lowercase()
    });

    // Genres: exact tag, absent tags together
    let genre_groups = group_by(rows.iter(), |row| row.genre.clone());

    let mut album_of_row = vec![AlbumId(0); rows.len()];
    for (album, draft) in drafts.iter().enumerate() {
        for &row in &draft.rows {
            album_of_row[row] = AlbumId(album);
        }
    }

    let mut artist_of_album = vec![ArtistId(0); drafts.len()];
    for (artist, albums) in artist_groups.iter().enumerate() {
        for &album in albums {
            artist_of_album[album] = ArtistId(artist);
        }
    }

    let mut genre_of_row = vec![GenreId(0); rows.len()];
    for (genre, rows_in_genre) in genre_groups.iter().enumerate() {
        for &row in rows_in_genre {
            genre_of_row[row] = GenreId(genre);
        }
    }

    let albums: Vec<Album> = drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| {
            let first = &rows[draft.rows[0]];
            // Latest year wins; no year at all stays unknown
            let year = draft.rows.iter().filter_map(|&row| rows[row].year).max();
            Album::new(
                first.album.clone(),
                year,
                CoverArt {
                    source_album_id: first.album_id,
                },
                draft.grouping_artist_name.clone(),
                draft.rows.iter().map(|&row| SongId(row)).collect(),
                artist_of_album[index],
            )
        })
        .collect();

    let artists: Vec<Artist> = artist_groups
        .into_iter()
        .map(|albums_of_artist| {
            let name = &drafts[albums_of_artist[0]].grouping_artist_name;
            let raw_name = (name != UNKNOWN).then(|| name.clone());
            Artist::new(raw_name, albums_of_artist.into_iter().map(AlbumId).collect())
        })
        .collect();

    let genres: Vec<Genre> = genre_groups
        .into_iter()
        .map(|rows_in_genre| {
            let raw_name = rows[rows_in_genre[0]].genre.clone();
            Genre::new(raw_name, rows_in_genre.into_iter().map(SongId).collect())
        })
        .collect();

    let songs: Vec<Song> = rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| Song::new(raw, album_of_row[row], genre_of_row[row]))
        .collect();

    debug!(
        songs = songs.len(),
        albums = albums.len(),
        artists = artists.len(),
        genres = genres.len(),
        "Linked library"
    );

    LoadOutcome::Loaded(Library::from_parts(songs, albums, artists, genres))
}

/// Partition items by key, keeping groups in order of first appearance and
/// items within a group in input order. Returns indices into the input.
fn group_by<'a, T: 'a, K: Hash + Eq>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
) -> Vec<Vec<usize>> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (position, item) in items.enumerate() {
        let slot = *index.entry(key(item)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(position);
    }

    groups
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_row() -> impl Strategy<Value = RawSong> {
        (
            proptest::option::of("[a-c]{1,3}"),
            "[a-cA-C]{0,2}",
            proptest::option::of("[a-cA-C]{1,2}"),
            proptest::option::of("[a-cA-C]{1,2}"),
            proptest::option::of(prop::sample::select(vec!["Rock", "rock", "(13)"])),
            proptest::option::of(1990i32..2020),
        )
            .prop_map(|(title, album, artist, album_artist, genre, year)| RawSong {
                title,
                file_name: "file.mp3".to_string(),
                album,
                artist,
                album_artist,
                genre: genre.map(str::to_string),
                year,
                ..RawSong::default()
            })
    }

    proptest! {
        /// Every song is linked both ways, whatever the tags
        #[test]
        fn every_song_is_linked(rows in prop::collection::vec(arbitrary_row(), 1..40)) {
            let count = rows.len();
            let library = build_library(rows).library().unwrap();
            prop_assert_eq!(library.songs().len(), count);
            prop_assert!(library.is_linked());

            let album_songs: usize = library.albums().iter().map(|a| a.songs().len()).sum();
            let genre_songs: usize = library.genres().iter().map(|g| g.songs().len()).sum();
            prop_assert_eq!(album_songs, count);
            prop_assert_eq!(genre_songs, count);
        }

        /// Songs share an album exactly when their grouping keys match
        #[test]
        fn albums_follow_grouping_key(rows in prop::collection::vec(arbitrary_row(), 1..40)) {
            let library = build_library(rows).library().unwrap();
            for a in library.songs() {
                for b in library.songs() {
                    let same_key = a.grouping_artist_name().to_lowercase()
                        == b.grouping_artist_name().to_lowercase()
                        && a.album_name.to_lowercase() == b.album_name.to_lowercase();
                    prop_assert_eq!(a.album() == b.album(), same_key);
                }
            }
        }

        /// An album's year is the maximum of its songs' years
        #[test]
        fn album_year_is_max(rows in prop::collection::vec(arbitrary_row(), 1..40)) {
            let library = build_library(rows).library().unwrap();
            for album in library.albums() {
                let max = album.songs().iter().filter_map(|&id| library.song(id).year).max();
                prop_assert_eq!(album.year, max);
            }
        }
    }
}
