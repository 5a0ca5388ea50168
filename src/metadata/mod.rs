//! Audio file tag reading.
//!
//! Uses the lofty crate for format-independent metadata access and turns
//! one file into one [`RawSong`] row. Absent tags stay `None`; nothing is
//! replaced by placeholder text here, fallback names are a display concern.

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::path::Path;

use crate::error::{Error, Result};
use crate::music::RawSong;

/// Stable 63-bit id derived from a SHA-256 digest of `parts`.
///
/// Parts are length-prefixed so ("ab", "c") and ("a", "bc") differ.
pub fn stable_id(parts: &[&[u8]]) -> i64 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    // Keep ids non-negative, like database row ids
    (u64::from_be_bytes(prefix) >> 1) as i64
}

/// Trimmed tag text, `None` when absent or blank.
fn text(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read the tags of one audio file.
///
/// The row id is derived from the file path and the album id from the
/// parent directory plus album name, so a rescan produces the same ids.
pub fn read(path: &Path) -> Result<RawSong> {
    // Probe the file to determine format and read tags
    let tagged_file = Probe::open(path)
        .map_err(|e| Error::metadata(path, format!("Failed to open file for probing: {e}")))?
        .read()
        .map_err(|e| Error::metadata(path, format!("Failed to read file metadata: {e}")))?;

    // Get the primary tag, or fall back to the first available tag
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let title = tag.and_then(|t| text(t.title()));
    let artist = tag.and_then(|t| text(t.artist()));
    let album = tag.and_then(|t| text(t.album())).unwrap_or_default();
    let genre = tag.and_then(|t| text(t.genre()));
    let album_artist = tag.and_then(|t| {
        t.get_string(&ItemKey::AlbumArtist)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    });
    let track = tag.and_then(|t| t.track());
    let year = tag
        .and_then(|t| t.year())
        .and_then(|y| i32::try_from(y).ok())
        .filter(|&y| y > 0);

    // Get duration from properties
    let duration = tagged_file.properties().duration();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = path.parent().unwrap_or(path);

    Ok(RawSong {
        title,
        file_name,
        duration_ms: u64::try_from(duration.as_millis()).ok(),
        track,
        id: stable_id(&[path.as_os_str().as_encoded_bytes()]),
        year,
        album_id: stable_id(&[dir.as_os_str().as_encoded_bytes(), album.as_bytes()]),
        album,
        artist,
        album_artist,
        genre,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_non_audio_file_returns_error() {
        // Create a temporary text file
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "This is just some text, not music.").expect("Failed to write to temp file");

        // Should fail because it's not a valid audio file
        let result = read(file.path());
        assert!(matches!(result, Err(Error::Metadata { .. })));
    }

    #[test]
    fn test_read_non_existent_file_returns_error() {
        let path = Path::new("non_existent_file.mp3");
        let result = read(path);
        assert!(result.is_err());
    }

    #[test]
    fn test_stable_id_is_deterministic() {
        let a = stable_id(&[b"/music/a.mp3".as_slice()]);
        assert_eq!(a, stable_id(&[b"/music/a.mp3".as_slice()]));
        assert_ne!(a, stable_id(&[b"/music/b.mp3".as_slice()]));
        assert!(a >= 0);
    }

    #[test]
    fn test_stable_id_separates_parts() {
        assert_ne!(stable_id(&[b"ab".as_slice(), b"c"]), stable_id(&[b"a".as_slice(), b"bc"]));
    }
}
