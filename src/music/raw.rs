//! Raw track rows, as handed over by a media source before linking.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::text::parse_track;

use super::UNKNOWN;

/// One track as read from a media index or tag scan.
///
/// Absent values are `None`, never empty strings. Numeric fields are read
/// leniently from JSON: numbers or numeric strings are accepted, anything
/// unparsable becomes `None` instead of failing the whole row file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSong {
    /// Track title
    pub title: Option<String>,
    /// File name, without directories
    pub file_name: String,
    /// Duration in milliseconds
    #[serde(deserialize_with = "lenient")]
    pub duration_ms: Option<u64>,
    /// Track number on its album
    #[serde(deserialize_with = "lenient_track")]
    pub track: Option<u32>,
    /// Row id in the source
    pub id: i64,
    /// Recording year
    #[serde(deserialize_with = "lenient")]
    pub year: Option<i32>,
    /// Album name (empty when the source had none)
    pub album: String,
    /// Album row id in the source
    pub album_id: i64,
    /// Artist tag
    pub artist: Option<String>,
    /// Album artist tag
    pub album_artist: Option<String>,
    /// Genre tag, possibly an ID3 code such as "(13)"
    pub genre: Option<String>,
}

impl RawSong {
    /// Artist name used to cluster this row into an album: the album artist,
    /// else the artist, else the unknown sentinel.
    pub fn grouping_artist_name(&self) -> &str {
        self.album_artist
            .as_deref()
            .or(self.artist.as_deref())
            .unwrap_or(UNKNOWN)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Value(v)) => Some(v),
        Some(Lenient::Text(s)) => s.trim().parse().ok(),
        Some(Lenient::Other(_)) | None => None,
    })
}

fn lenient_track<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient<u32>>::deserialize(deserializer)? {
        Some(Lenient::Value(v)) => Some(v),
        Some(Lenient::Text(s)) => parse_track(&s),
        Some(Lenient::Other(_)) | None => None,
    })
}
