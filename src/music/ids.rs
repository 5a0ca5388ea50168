//! Handles into the arenas owned by a [`Library`](crate::library::Library).
//!
//! A handle is only meaningful for the library that produced it.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Position in the owning library's arena.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Handle to a [`Song`](super::Song).
    SongId,
    "song"
);
arena_id!(
    /// Handle to an [`Album`](super::Album).
    AlbumId,
    "album"
);
arena_id!(
    /// Handle to an [`Artist`](super::Artist).
    ArtistId,
    "artist"
);
arena_id!(
    /// Handle to a [`Genre`](super::Genre).
    GenreId,
    "genre"
);

/// Any music entity, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicId {
    Song(SongId),
    Album(AlbumId),
    Artist(ArtistId),
    Genre(GenreId),
}

impl From<SongId> for MusicId {
    fn from(id: SongId) -> Self {
        MusicId::Song(id)
    }
}

impl From<AlbumId> for MusicId {
    fn from(id: AlbumId) -> Self {
        MusicId::Album(id)
    }
}

impl From<ArtistId> for MusicId {
    fn from(id: ArtistId) -> Self {
        MusicId::Artist(id)
    }
}

impl From<GenreId> for MusicId {
    fn from(id: GenreId) -> Self {
        MusicId::Genre(id)
    }
}

impl fmt::Display for MusicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusicId::Song(id) => id.fmt(f),
            MusicId::Album(id) => id.fmt(f),
            MusicId::Artist(id) => id.fmt(f),
            MusicId::Genre(id) => id.fmt(f),
        }
    }
}
