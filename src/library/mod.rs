//! The linked music library.
//!
//! A [`Library`] is an immutable snapshot produced by [`build_library`] from a
//! flat list of [`RawSong`](crate::music::RawSong) rows. It owns one arena per
//! entity kind and hands out the handles defined in [`crate::music::ids`].
//!
//! Snapshots are shared through a [`MusicStore`], which replaces the whole
//! library at once so readers never see a half-built graph.

mod linker;
mod store;

use std::borrow::Cow;

use crate::music::{Album, AlbumId, Artist, ArtistId, Genre, GenreId, MusicId, Song, SongId};
use crate::strings::Strings;

pub use linker::build_library;
pub use store::MusicStore;

/// Result of building a library from a batch of rows.
///
/// An empty batch is not an error: it is reported as [`LoadOutcome::NoMusic`]
/// so callers can show a "no music" state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<L = Library> {
    Loaded(L),
    NoMusic,
}

impl<L> LoadOutcome<L> {
    /// The library, if any music was found.
    pub fn library(self) -> Option<L> {
        match self {
            LoadOutcome::Loaded(library) => Some(library),
            LoadOutcome::NoMusic => None,
        }
    }

    pub fn is_no_music(&self) -> bool {
        matches!(self, LoadOutcome::NoMusic)
    }
}

/// A fully linked snapshot of songs, albums, artists and genres.
///
/// Collections keep insertion order (first appearance in the source rows);
/// listings re-sort through [`crate::sort::Sort`] before display.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    songs: Vec<Song>,
    albums: Vec<Album>,
    artists: Vec<Artist>,
    genres: Vec<Genre>,
}

impl Library {
    pub(crate) fn from_parts(
        songs: Vec<Song>,
        albums: Vec<Album>,
        artists: Vec<Artist>,
        genres: Vec<Genre>,
    ) -> Self {
        Self {
            songs,
            albums,
            artists,
            genres,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Look up a song.
    ///
    /// # Panics
    ///
    /// If the handle belongs to another library.
    pub fn song(&self, id: SongId) -> &Song {
        &self.songs[id.0]
    }

    /// Look up an album. Panics on a foreign handle.
    pub fn album(&self, id: AlbumId) -> &Album {
        &self.albums[id.0]
    }

    /// Look up an artist. Panics on a foreign handle.
    pub fn artist(&self, id: ArtistId) -> &Artist {
        &self.artists[id.0]
    }

    /// Look up a genre. Panics on a foreign handle.
    pub fn genre(&self, id: GenreId) -> &Genre {
        &self.genres[id.0]
    }

    pub fn song_ids(&self) -> impl ExactSizeIterator<Item = SongId> + use<> {
        (0..self.songs.len()).map(SongId)
    }

    pub fn album_ids(&self) -> impl ExactSizeIterator<Item = AlbumId> + use<> {
        (0..self.albums.len()).map(AlbumId)
    }

    pub fn artist_ids(&self) -> impl ExactSizeIterator<Item = ArtistId> + use<> {
        (0..self.artists.len()).map(ArtistId)
    }

    pub fn genre_ids(&self) -> impl ExactSizeIterator<Item = GenreId> + use<> {
        (0..self.genres.len()).map(GenreId)
    }

    /// Display name of any entity.
    pub fn resolve_name<'a>(&'a self, id: MusicId, strings: &'a dyn Strings) -> Cow<'a, str> {
        match id {
            MusicId::Song(id) => Cow::Borrowed(self.song(id).resolve_name()),
            MusicId::Album(id) => Cow::Borrowed(self.album(id).resolve_name()),
            MusicId::Artist(id) => Cow::Borrowed(self.artist(id).resolve_name(strings)),
            MusicId::Genre(id) => self.genre(id).resolve_name(strings),
        }
    }

    /// Identity key of any entity.
    pub fn key(&self, id: MusicId) -> u64 {
        match id {
            MusicId::Song(id) => self.song(id).key(self),
            MusicId::Album(id) => self.album(id).key(self),
            MusicId::Artist(id) => self.artist(id).key(),
            MusicId::Genre(id) => self.genre(id).key(),
        }
    }

    /// Check that parent and child links agree in both directions.
    pub fn is_linked(&self) -> bool {
        let songs_ok = self.song_ids().all(|id| {
            let song = self.song(id);
            self.album(song.album()).songs().contains(&id)
                && self.genre(song.genre()).songs().contains(&id)
        });
        let albums_ok = self
            .album_ids()
            .all(|id| self.artist(self.album(id).artist()).albums().contains(&id));
        let children_ok = self.album_ids().all(|album| {
            self.album(album)
                .songs()
                .iter()
                .all(|&song| self.song(song).album() == album)
        }) && self.artist_ids().all(|artist| {
            self.artist(artist)
                .albums()
                .iter()
                .all(|&album| self.album(album).artist() == artist)
        }) && self.genre_ids().all(|genre| {
            self.genre(genre)
                .songs()
                .iter()
                .all(|&song| self.song(song).genre() == genre)
        });

        songs_ok && albums_ok && children_ok
    }
}
