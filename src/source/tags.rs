//! Rows read from audio file tags.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::music::RawSong;
use crate::{metadata, scanner};

use super::SongSource;

/// Scans a directory and reads every audio file's tags into a row.
///
/// Files whose tags can't be read are logged and skipped; only a missing
/// root directory fails the whole source.
#[derive(Debug, Clone)]
pub struct TagSource {
    root: PathBuf,
    recursive: bool,
}

impl TagSource {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SongSource for TagSource {
    fn rows(&self) -> Result<Vec<RawSong>> {
        if !self.root.is_dir() {
            return Err(Error::not_found(&self.root));
        }

        let paths = scanner::scan(&self.root, self.recursive);
        debug!(root = %self.root.display(), files = paths.len(), "Scanned directory");

        // Tag reads are independent; collect keeps scan order
        let rows: Vec<RawSong> = paths
            .par_iter()
            .filter_map(|path| match metadata::read(path) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!("Skipping file: {}", e);
                    None
                }
            })
            .collect();

        debug!(
            read = rows.len(),
            skipped = paths.len() - rows.len(),
            "Read tags"
        );
        Ok(rows)
    }
}
