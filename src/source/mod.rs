//! Raw-row sources.
//!
//! A [`SongSource`] is anything that can hand over the flat track rows the
//! linker consumes. Two adapters ship with the crate:
//!
//! - [`JsonSource`]: a JSON array of rows exported from a media index
//! - [`TagSource`]: a directory of audio files read with lofty
//!
//! [`open`] picks one by looking at the path.

mod tags;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result, ResultExt};
use crate::music::RawSong;

pub use tags::TagSource;

/// Supplies raw rows for one load cycle.
pub trait SongSource {
    fn rows(&self) -> Result<Vec<RawSong>>;
}

impl SongSource for Vec<RawSong> {
    fn rows(&self) -> Result<Vec<RawSong>> {
        Ok(self.clone())
    }
}

impl SongSource for Box<dyn SongSource + Send> {
    fn rows(&self) -> Result<Vec<RawSong>> {
        (**self).rows()
    }
}

/// Several sources read back to back; rows keep source order.
impl SongSource for Vec<Box<dyn SongSource + Send>> {
    fn rows(&self) -> Result<Vec<RawSong>> {
        let mut rows = Vec::new();
        for source in self {
            rows.extend(source.rows()?);
        }
        Ok(rows)
    }
}

/// Rows stored as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SongSource for JsonSource {
    fn rows(&self) -> Result<Vec<RawSong>> {
        if !self.path.exists() {
            return Err(Error::not_found(&self.path));
        }

        let text = fs::read_to_string(&self.path)
            .with_context(format!("reading {}", self.path.display()))?;
        let rows: Vec<RawSong> = serde_json::from_str(&text)
            .with_context(format!("decoding {}", self.path.display()))?;

        debug!(path = %self.path.display(), rows = rows.len(), "Read JSON rows");
        Ok(rows)
    }
}

/// Source for `path`: a tag scan for directories, JSON rows otherwise.
pub fn open(path: &Path, recursive: bool) -> Box<dyn SongSource + Send> {
    if path.is_dir() {
        Box::new(TagSource::new(path, recursive))
    } else {
        Box::new(JsonSource::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_json_source_reads_rows() {
        let file = json_file(
            r#"[
                { "title": "One", "file_name": "1.mp3", "album": "A", "artist": "X" },
                { "title": "Two", "file_name": "2.mp3", "album": "A", "track": "2/9" }
            ]"#,
        );
        let rows = JsonSource::new(file.path()).rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].artist.as_deref(), Some("X"));
        assert_eq!(rows[1].track, Some(2));
    }

    #[test]
    fn test_json_source_missing_file() {
        let result = JsonSource::new("/definitely/not/here.json").rows();
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_json_source_bad_json_has_context() {
        let file = json_file("{ not json");
        let err = JsonSource::new(file.path()).rows().unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().starts_with("decoding"));
    }

    #[test]
    fn test_multiple_sources_concatenate() {
        let sources: Vec<Box<dyn SongSource + Send>> = vec![
            Box::new(vec![crate::test_utils::raw_song("One", "A", "X")]),
            Box::new(vec![crate::test_utils::raw_song("Two", "B", "Y")]),
        ];
        let rows = sources.rows().unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("One"), Some("Two")]);
    }

    #[test]
    fn test_open_picks_by_path_kind() {
        let dir = tempdir().unwrap();
        // An empty directory scans to no rows
        assert!(open(dir.path(), true).rows().unwrap().is_empty());

        let file = json_file("[]");
        assert!(open(file.path(), true).rows().unwrap().is_empty());
    }
}
