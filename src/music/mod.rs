//! Core data models for the music library.
//!
//! Defines the four linked entities: [`Song`], [`Album`], [`Artist`] and
//! [`Genre`]. They only exist inside a [`Library`], which owns one arena per
//! kind; entities refer to each other through the handles in [`ids`].
//!
//! # Links
//!
//! - every song belongs to exactly one album and one genre
//! - every album belongs to exactly one artist
//! - an artist's songs are the songs of its albums, never stored twice
//!
//! Parent handles are fixed when the linker constructs an entity and can't be
//! changed afterwards, so there is no "unlinked" state to observe.

pub mod ids;
mod raw;

use std::borrow::Cow;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::library::Library;
use crate::strings::Strings;
use crate::text::{format_duration, genre_name_compat, sort_name};

pub use ids::{AlbumId, ArtistId, GenreId, MusicId, SongId};
pub use raw::RawSong;

/// Sentinel the media index uses for a missing artist.
pub const UNKNOWN: &str = "<unknown>";

/// 64-bit identity hash of a value. Stable within a process only.
pub(crate) fn identity_hash(value: impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A single track.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// Title, `None` if unknown
    pub raw_name: Option<String>,
    /// File name, without directories
    pub file_name: String,
    /// Duration in milliseconds (0 if the source had none)
    pub duration_ms: u64,
    /// Track number on the album
    pub track: Option<u32>,
    /// Row id in the source
    pub source_id: i64,
    /// Recording year
    pub year: Option<i32>,
    /// Album name as tagged on this song
    pub album_name: String,
    /// Album row id in the source
    pub source_album_id: i64,
    /// Artist tag of this song
    pub artist_name: Option<String>,
    /// Album artist tag of this song
    pub album_artist_name: Option<String>,
    /// Genre tag of this song
    pub genre_name: Option<String>,
    album: AlbumId,
    genre: GenreId,
}

impl Song {
    pub(crate) fn new(raw: RawSong, album: AlbumId, genre: GenreId) -> Self {
        Self {
            raw_name: raw.title,
            file_name: raw.file_name,
            duration_ms: raw.duration_ms.unwrap_or(0),
            track: raw.track,
            source_id: raw.id,
            year: raw.year,
            album_name: raw.album,
            source_album_id: raw.album_id,
            artist_name: raw.artist,
            album_artist_name: raw.album_artist,
            genre_name: raw.genre,
            album,
            genre,
        }
    }

    /// The album this song belongs to.
    pub fn album(&self) -> AlbumId {
        self.album
    }

    /// The genre this song belongs to.
    pub fn genre(&self) -> GenreId {
        self.genre
    }

    /// Display name: the title, or the file name when the title is unknown.
    pub fn resolve_name(&self) -> &str {
        self.raw_name.as_deref().unwrap_or(&self.file_name)
    }

    /// Name used for ordering.
    pub fn sort_name(&self) -> Option<&str> {
        self.raw_name.as_deref().map(sort_name)
    }

    /// Duration in whole seconds, rounded down.
    pub fn seconds(&self) -> u64 {
        self.duration_ms / 1000
    }

    /// Identity key: title, album name, album artist name, track and duration.
    pub fn key(&self, library: &Library) -> u64 {
        let album = library.album(self.album);
        let artist = library.artist(album.artist());
        identity_hash((
            &self.raw_name,
            &album.raw_name,
            &artist.raw_name,
            self.track.unwrap_or(0),
            self.duration_ms,
        ))
    }

    /// Artist name used to cluster this song into an album.
    pub fn grouping_artist_name(&self) -> &str {
        self.album_artist_name
            .as_deref()
            .or(self.artist_name.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Hash of the lowercased grouping artist and album names.
    pub fn album_grouping_key(&self) -> u64 {
        identity_hash((
            self.grouping_artist_name().to_lowercase(),
            self.album_name.to_lowercase(),
        ))
    }

    /// This song's own artist tag, falling back to its album's artist.
    /// `None` if both are unknown.
    pub fn individual_raw_artist_name<'a>(&'a self, library: &'a Library) -> Option<&'a str> {
        self.artist_name
            .as_deref()
            .or_else(|| library.artist(library.album(self.album).artist()).raw_name.as_deref())
    }

    /// Display form of [`Song::individual_raw_artist_name`].
    pub fn resolve_individual_artist_name<'a>(
        &'a self,
        library: &'a Library,
        strings: &'a dyn Strings,
    ) -> &'a str {
        match self.artist_name.as_deref() {
            Some(name) => name,
            None => library
                .artist(library.album(self.album).artist())
                .resolve_name(strings),
        }
    }
}

/// Locator of an album's cover art in the media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoverArt {
    pub source_album_id: i64,
}

impl fmt::Display for CoverArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "albumart://{}", self.source_album_id)
    }
}

/// A group of songs sharing an album name and grouping artist.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    /// Album name
    pub raw_name: String,
    /// Latest year among the album's songs
    pub year: Option<i32>,
    /// Cover art, taken from the first song's album row
    pub cover: CoverArt,
    /// Grouping artist name carried over from the songs
    pub grouping_artist_name: String,
    songs: Vec<SongId>,
    artist: ArtistId,
}

impl Album {
    pub(crate) fn new(
        raw_name: String,
        year: Option<i32>,
        cover: CoverArt,
        grouping_artist_name: String,
        songs: Vec<SongId>,
        artist: ArtistId,
    ) -> Self {
        Self {
            raw_name,
            year,
            cover,
            grouping_artist_name,
            songs,
            artist,
        }
    }

    /// Songs in source order.
    pub fn songs(&self) -> &[SongId] {
        &self.songs
    }

    /// The artist this album belongs to.
    pub fn artist(&self) -> ArtistId {
        self.artist
    }

    pub fn resolve_name(&self) -> &str {
        &self.raw_name
    }

    pub fn sort_name(&self) -> &str {
        sort_name(&self.raw_name)
    }

    /// Identity key: name, artist name and year.
    pub fn key(&self, library: &Library) -> u64 {
        let artist = library.artist(self.artist);
        identity_hash((&self.raw_name, &artist.raw_name, self.year.unwrap_or(0)))
    }

    /// Hash of the lowercased grouping artist name.
    pub fn artist_grouping_key(&self) -> u64 {
        identity_hash(self.grouping_artist_name.to_lowercase())
    }

    /// Sum of the songs' whole seconds.
    pub fn total_seconds(&self, library: &Library) -> u64 {
        self.songs.iter().map(|&id| library.song(id).seconds()).sum()
    }

    /// Formatted total duration, e.g. "42:17".
    pub fn total_duration(&self, library: &Library) -> String {
        format_duration(self.total_seconds(library))
    }
}

/// An album artist: every album sharing a grouping artist name.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    /// Name, `None` for the unknown artist
    pub raw_name: Option<String>,
    albums: Vec<AlbumId>,
}

impl Artist {
    pub(crate) fn new(raw_name: Option<String>, albums: Vec<AlbumId>) -> Self {
        Self { raw_name, albums }
    }

    pub fn albums(&self) -> &[AlbumId] {
        &self.albums
    }

    /// Songs of all albums, album by album.
    pub fn songs<'a>(&'a self, library: &'a Library) -> impl Iterator<Item = SongId> + 'a {
        self.albums
            .iter()
            .flat_map(move |&id| library.album(id).songs().iter().copied())
    }

    pub fn song_count(&self, library: &Library) -> usize {
        self.albums
            .iter()
            .map(|&id| library.album(id).songs().len())
            .sum()
    }

    pub fn resolve_name<'a>(&'a self, strings: &'a dyn Strings) -> &'a str {
        self.raw_name
            .as_deref()
            .unwrap_or_else(|| strings.unknown_artist())
    }

    pub fn sort_name(&self) -> Option<&str> {
        self.raw_name.as_deref().map(sort_name)
    }

    /// Identity key: the name, or the unknown sentinel.
    pub fn key(&self) -> u64 {
        identity_hash(self.raw_name.as_deref().unwrap_or(UNKNOWN))
    }
}

/// Every song sharing an exact genre tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    /// Genre tag, `None` for songs without one
    pub raw_name: Option<String>,
    songs: Vec<SongId>,
}

impl Genre {
    pub(crate) fn new(raw_name: Option<String>, songs: Vec<SongId>) -> Self {
        Self { raw_name, songs }
    }

    pub fn songs(&self) -> &[SongId] {
        &self.songs
    }

    /// Display name with ID3 codes decoded.
    pub fn resolve_name<'a>(&'a self, strings: &'a dyn Strings) -> Cow<'a, str> {
        match self.raw_name.as_deref() {
            Some(raw) => genre_name_compat(raw),
            None => Cow::Borrowed(strings.unknown_genre()),
        }
    }

    /// Genres sort by their decoded name; articles are kept.
    pub fn sort_name(&self) -> Option<Cow<'_, str>> {
        self.raw_name.as_deref().map(genre_name_compat)
    }

    /// Identity key: the tag, or the unknown sentinel.
    pub fn key(&self) -> u64 {
        identity_hash(self.raw_name.as_deref().unwrap_or(UNKNOWN))
    }

    pub fn total_seconds(&self, library: &Library) -> u64 {
        self.songs.iter().map(|&id| library.song(id).seconds()).sum()
    }

    pub fn total_duration(&self, library: &Library) -> String {
        format_duration(self.total_seconds(library))
    }
}

/// Whether `old` in one snapshot and `new` in another show the same item,
/// for diffing two listings across a reload.
pub fn same_item(old_library: &Library, old: MusicId, new_library: &Library, new: MusicId) -> bool {
    match (old, new) {
        (MusicId::Song(a), MusicId::Song(b)) => {
            let (a, b) = (old_library.song(a), new_library.song(b));
            a.raw_name == b.raw_name
                && a.individual_raw_artist_name(old_library)
                    == b.individual_raw_artist_name(new_library)
        }
        (MusicId::Album(a), MusicId::Album(b)) => {
            let (a, b) = (old_library.album(a), new_library.album(b));
            a.raw_name == b.raw_name
                && old_library.artist(a.artist()).raw_name
                    == new_library.artist(b.artist()).raw_name
        }
        (MusicId::Artist(a), MusicId::Artist(b)) => {
            let (a, b) = (old_library.artist(a), new_library.artist(b));
            a.raw_name == b.raw_name
                && a.albums().len() == b.albums().len()
                && a.song_count(old_library) == b.song_count(new_library)
        }
        (MusicId::Genre(a), MusicId::Genre(b)) => {
            let (a, b) = (old_library.genre(a), new_library.genre(b));
            a.raw_name == b.raw_name && a.songs().len() == b.songs().len()
        }
        _ => false,
    }
}
