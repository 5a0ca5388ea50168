//! Locale-dependent display strings.
//!
//! The model never hard-codes user-facing fallback names; it asks a
//! [`Strings`] implementation, normally the `[strings]` config section.

use crate::config::StringsConfig;

/// Which entity a count phrase describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Songs,
    Albums,
    Artists,
    Genres,
}

/// Resolver for fallback names and pluralized count phrases.
pub trait Strings: Send + Sync {
    /// Name shown for an artist without a name.
    fn unknown_artist(&self) -> &str;

    /// Name shown for a genre without a name.
    fn unknown_genre(&self) -> &str;

    /// Phrase such as "3 songs". Display only.
    fn count(&self, kind: CountKind, n: usize) -> String;
}

impl Strings for StringsConfig {
    fn unknown_artist(&self) -> &str {
        &self.unknown_artist
    }

    fn unknown_genre(&self) -> &str {
        &self.unknown_genre
    }

    fn count(&self, kind: CountKind, n: usize) -> String {
        let (one, other) = match kind {
            CountKind::Songs => (&self.song_one, &self.song_other),
            CountKind::Albums => (&self.album_one, &self.album_other),
            CountKind::Artists => (&self.artist_one, &self.artist_other),
            CountKind::Genres => (&self.genre_one, &self.genre_other),
        };
        let template = if n == 1 { one } else { other };
        template.replacen("{}", &n.to_string(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fallbacks() {
        let strings = StringsConfig::default();
        assert_eq!(strings.unknown_artist(), "Unknown Artist");
        assert_eq!(strings.unknown_genre(), "Unknown Genre");
    }

    #[test]
    fn test_count_pluralizes() {
        let strings = StringsConfig::default();
        assert_eq!(strings.count(CountKind::Songs, 1), "1 song");
        assert_eq!(strings.count(CountKind::Songs, 0), "0 songs");
        assert_eq!(strings.count(CountKind::Albums, 12), "12 albums");
        assert_eq!(strings.count(CountKind::Genres, 1), "1 genre");
    }

    #[test]
    fn test_custom_templates() {
        let strings = StringsConfig {
            artist_one: "un artiste".to_string(),
            artist_other: "{} artistes".to_string(),
            ..StringsConfig::default()
        };
        assert_eq!(strings.count(CountKind::Artists, 1), "un artiste");
        assert_eq!(strings.count(CountKind::Artists, 4), "4 artistes");
    }
}
