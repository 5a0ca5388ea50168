//! Music Shelf - a linked music library with sorting and search.
//!
//! Flat track rows (from a tag scan or an exported media index) are linked
//! into songs, albums, artists and genres, which can then be listed in a
//! chosen order or searched without regard to case and accents.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod metadata;
pub mod music;
pub mod scanner;
pub mod search;
pub mod sort;
pub mod source;
pub mod strings;
#[cfg(test)]
pub mod test_utils;
pub mod text;
