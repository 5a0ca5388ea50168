//! Text helpers shared by the model, sorting and search.
//!
//! - [`normalize`]: diacritic-insensitive form of a display name for matching
//! - [`sort_name`]: display name without a leading English article
//! - [`genre_name_compat`]: decodes legacy ID3 numeric genre codes
//! - [`parse_track`]: tolerant track-number parsing for raw rows

mod genres;

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

pub use genres::GENRE_TABLE;

/// Strip accents and other combining marks so that "Cafe" matches "Café".
///
/// Applies NFKD (compatibility decomposition) and drops the non-spacing and
/// spacing marks it produced. Enclosing marks are kept. Idempotent.
pub fn normalize(s: &str) -> String {
    s.nfkd().filter(|&c| !is_accent_mark(c)).collect()
}

fn is_accent_mark(c: char) -> bool {
    matches!(
        c.general_category(),
        GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark
    )
}

/// Name used for ordering: a single leading "the ", "an " or "a " is removed,
/// case-insensitively, only if something meaningful follows it.
///
/// ```
/// use music_shelf::text::sort_name;
/// assert_eq!(sort_name("The Beatles"), "Beatles");
/// assert_eq!(sort_name("Anchor"), "Anchor");
/// ```
pub fn sort_name(name: &str) -> &str {
    for article in ["the ", "an ", "a "] {
        if let Some(rest) = strip_prefix_ignore_case(name, article)
            && name.chars().count() > article.len() + 1
        {
            return rest;
        }
    }
    name
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Decode an ID3 genre constant into its name.
///
/// ID3v1 stores the bare number ("13"), ID3v2.3/2.4 wraps it in parentheses
/// ("(13)"). Codes outside [`GENRE_TABLE`] and ordinary names pass through.
pub fn genre_name_compat(raw: &str) -> Cow<'_, str> {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        return lookup_genre(raw).map_or(Cow::Borrowed(raw), Cow::Borrowed);
    }

    if let Some(inner) = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')'))
        && let Some(name) = lookup_genre(inner)
    {
        return Cow::Borrowed(name);
    }

    Cow::Borrowed(raw)
}

fn lookup_genre(code: &str) -> Option<&'static str> {
    let index: usize = code.parse().ok()?;
    GENRE_TABLE.get(index).copied()
}

/// Parse a raw track field.
///
/// Accepts "7", "07" and "7/12" (position/total). Anything else is `None`.
pub fn parse_track(raw: &str) -> Option<u32> {
    let position = raw.split('/').next()?.trim();
    position.parse().ok()
}

/// Format a number of seconds as `m:ss`, or `h:mm:ss` past the hour.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalizing twice changes nothing
        #[test]
        fn normalize_is_idempotent(input in "\\PC{0,40}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Normalized text never contains a non-spacing or spacing mark
        #[test]
        fn normalize_removes_accent_marks(input in "\\PC{0,40}") {
            prop_assert!(normalize(&input).chars().all(|c| !is_accent_mark(c)));
        }

        /// The sort name is always a suffix of the original
        #[test]
        fn sort_name_is_suffix(input in "[a-zA-Z ]{0,20}") {
            prop_assert!(input.ends_with(sort_name(&input)));
        }

        /// Names without a leading article are left alone
        #[test]
        fn sort_name_keeps_non_article_names(input in "[b-zB-Z][a-z ]{0,20}") {
            prop_assume!(!input.to_lowercase().starts_with("the "));
            prop_assert_eq!(sort_name(&input), input.as_str());
        }

        /// Every valid genre code decodes to the same name in both encodings
        #[test]
        fn genre_codes_decode_consistently(code in 0usize..GENRE_TABLE.len()) {
            let bare = code.to_string();
            let wrapped = format!("({})", code);
            prop_assert_eq!(genre_name_compat(&bare), genre_name_compat(&wrapped));
            prop_assert_eq!(genre_name_compat(&bare), GENRE_TABLE[code]);
        }
    }
}
