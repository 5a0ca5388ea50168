//! Test utilities and fixtures for music-shelf tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{build, raw_song};
//!
//! let library = build(vec![
//!     raw_song("Blackbird", "The Beatles", "The Beatles"),
//!     RawSong {
//!         year: Some(1969),
//!         ..raw_song("Come Together", "Abbey Road", "The Beatles")
//!     },
//! ]);
//! ```

use crate::library::{Library, build_library};
use crate::music::RawSong;

/// Creates a raw row with sensible defaults.
///
/// The artist tag is set, album artist and genre are absent, the duration
/// is three minutes. Customize with struct update syntax.
pub fn raw_song(title: &str, album: &str, artist: &str) -> RawSong {
    RawSong {
        title: Some(title.to_string()),
        file_name: format!("{title}.mp3"),
        duration_ms: Some(180_000),
        track: None,
        id: 0,
        year: None,
        album: album.to_string(),
        album_id: 0,
        artist: Some(artist.to_string()),
        album_artist: None,
        genre: None,
    }
}

/// Links `rows` into a library.
///
/// # Panics
///
/// If `rows` is empty.
pub fn build(rows: Vec<RawSong>) -> Library {
    build_library(rows)
        .library()
        .expect("fixture rows should produce a library")
}
