//! Sort orders for library listings.
//!
//! Every listing and search section is ordered through [`Sort`]. Sorting never
//! touches the library; it returns a new vector of handles.
//!
//! | Mode              | Songs        | Albums    | Artists   | Genres    |
//! |-------------------|--------------|-----------|-----------|-----------|
//! | `alpha-asc`       |              | sort name | sort name | name      |
//! | `alpha-desc`      |              | reversed  | reversed  | reversed  |
//! | `numeric-asc`     | track number | year      |           |           |
//! | `numeric-desc`    | track, desc  | year, desc|           |           |
//!
//! Empty cells keep the input order. All sorts are stable, names compare
//! case-insensitively, and missing numbers or names come last.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::library::Library;
use crate::music::{AlbumId, ArtistId, GenreId, SongId};
use crate::search::DisplayMode;

/// How a listing is ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum SortMode {
    #[serde(rename = "alpha-asc")]
    #[value(name = "alpha-asc")]
    AlphaAscending,
    #[serde(rename = "alpha-desc")]
    #[value(name = "alpha-desc")]
    AlphaDescending,
    #[serde(rename = "numeric-asc")]
    #[value(name = "numeric-asc")]
    NumericAscending,
    #[serde(rename = "numeric-desc")]
    #[value(name = "numeric-desc")]
    NumericDescending,
}

impl SortMode {
    /// Whether this mode orders the given kind at all.
    pub fn applies_to(self, kind: DisplayMode) -> bool {
        match (self, kind) {
            (SortMode::AlphaAscending | SortMode::AlphaDescending, DisplayMode::Songs) => false,
            (SortMode::NumericAscending | SortMode::NumericDescending, kind) => {
                matches!(kind, DisplayMode::Songs | DisplayMode::Albums)
            }
            _ => true,
        }
    }

    fn is_descending(self) -> bool {
        matches!(self, SortMode::AlphaDescending | SortMode::NumericDescending)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::AlphaAscending => "alpha-asc",
            SortMode::AlphaDescending => "alpha-desc",
            SortMode::NumericAscending => "numeric-asc",
            SortMode::NumericDescending => "numeric-desc",
        })
    }
}

/// A sort mode bound to the library whose handles it orders.
#[derive(Debug, Clone, Copy)]
pub struct Sort<'a> {
    library: &'a Library,
    mode: SortMode,
}

impl<'a> Sort<'a> {
    pub fn new(library: &'a Library, mode: SortMode) -> Self {
        Self { library, mode }
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn songs(&self, ids: &[SongId]) -> Vec<SongId> {
        match self.mode {
            SortMode::NumericAscending | SortMode::NumericDescending => {
                self.by_number(ids, |id| self.library.song(id).track.map(i64::from))
            }
            _ => ids.to_vec(),
        }
    }

    pub fn albums(&self, ids: &[AlbumId]) -> Vec<AlbumId> {
        match self.mode {
            SortMode::AlphaAscending | SortMode::AlphaDescending => {
                self.by_name(ids, |id| Some(self.library.album(id).sort_name().to_lowercase()))
            }
            SortMode::NumericAscending | SortMode::NumericDescending => {
                self.by_number(ids, |id| self.library.album(id).year.map(i64::from))
            }
        }
    }

    pub fn artists(&self, ids: &[ArtistId]) -> Vec<ArtistId> {
        match self.mode {
            SortMode::AlphaAscending | SortMode::AlphaDescending => self.by_name(ids, |id| {
                self.library.artist(id).sort_name().map(str::to_lowercase)
            }),
            _ => ids.to_vec(),
        }
    }

    pub fn genres(&self, ids: &[GenreId]) -> Vec<GenreId> {
        match self.mode {
            SortMode::AlphaAscending | SortMode::AlphaDescending => self.by_name(ids, |id| {
                self.library.genre(id).sort_name().map(|name| name.to_lowercase())
            }),
            _ => ids.to_vec(),
        }
    }

    /// Alphabetical order, unnamed entries last. Descending reverses the
    /// whole order.
    fn by_name<T: Copy>(&self, ids: &[T], name: impl Fn(T) -> Option<String>) -> Vec<T> {
        let mut sorted = ids.to_vec();
        if self.mode.is_descending() {
            sorted.sort_by_cached_key(|&id| Reverse(nulls_last(name(id))));
        } else {
            sorted.sort_by_cached_key(|&id| nulls_last(name(id)));
        }
        sorted
    }

    /// Numeric order, missing numbers last in either direction.
    fn by_number<T: Copy>(&self, ids: &[T], number: impl Fn(T) -> Option<i64>) -> Vec<T> {
        let descending = self.mode.is_descending();
        let mut sorted = ids.to_vec();
        sorted.sort_by_key(|&id| nulls_last(number(id).map(|n| if descending { -n } else { n })));
        sorted
    }
}

fn nulls_last<K: Ord>(key: Option<K>) -> (bool, Option<K>) {
    (key.is_none(), key)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::music::RawSong;
    use proptest::prelude::*;

    proptest! {
        /// Sorting permutes the input without dropping or duplicating
        #[test]
        fn sort_is_permutation(
            years in prop::collection::vec(proptest::option::of(1950i32..2030), 1..30),
            descending in any::<bool>(),
        ) {
            let rows = years
                .iter()
                .enumerate()
                .map(|(i, &year)| RawSong {
                    album: format!("Album {i}"),
                    year,
                    ..RawSong::default()
                })
                .collect();
            let library = crate::library::build_library(rows).library().unwrap();
            let ids: Vec<_> = library.album_ids().collect();
            let mode = if descending { SortMode::NumericDescending } else { SortMode::NumericAscending };
            let sorted = Sort::new(&library, mode).albums(&ids);

            let mut check = sorted.clone();
            check.sort();
            prop_assert_eq!(check, ids);

            // Years are monotonic until the first missing one, then all missing
            let sorted_years: Vec<_> = sorted.iter().map(|&id| library.album(id).year).collect();
            let known = sorted_years.iter().take_while(|y| y.is_some()).count();
            prop_assert!(sorted_years[known..].iter().all(Option::is_none));
            for pair in sorted_years[..known].windows(2) {
                if descending {
                    prop_assert!(pair[0] >= pair[1]);
                } else {
                    prop_assert!(pair[0] <= pair[1]);
                }
            }
        }
    }
}
