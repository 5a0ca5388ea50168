//! Shared slot holding the current library snapshot.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::source::SongSource;

use super::{Library, LoadOutcome, build_library};

/// Holds the most recently loaded [`Library`].
///
/// Readers get an `Arc` to an immutable snapshot; a reload swaps the whole
/// snapshot in one step. Holders of an old `Arc` keep a consistent graph.
#[derive(Debug, Default)]
pub struct MusicStore {
    current: RwLock<Option<Arc<Library>>>,
}

impl MusicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, `None` before the first load or after a load
    /// that found no music.
    pub fn library(&self) -> Option<Arc<Library>> {
        self.current.read().clone()
    }

    /// Replace the current snapshot.
    pub fn publish(&self, library: Library) -> Arc<Library> {
        let library = Arc::new(library);
        *self.current.write() = Some(Arc::clone(&library));
        library
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }

    /// Read rows from `source` and link them on the blocking pool, then
    /// publish the result.
    ///
    /// A source error leaves the previous snapshot in place. An empty source
    /// clears it.
    pub async fn load<S>(&self, source: S) -> Result<LoadOutcome<Arc<Library>>>
    where
        S: SongSource + Send + 'static,
    {
        let outcome = tokio::task::spawn_blocking(move || {
            let rows = source.rows()?;
            debug!(rows = rows.len(), "Read rows from source");
            Ok::<_, crate::error::Error>(build_library(rows))
        })
        .await??;

        Ok(match outcome {
            LoadOutcome::Loaded(library) => {
                info!(
                    songs = library.songs().len(),
                    albums = library.albums().len(),
                    "Library loaded"
                );
                LoadOutcome::Loaded(self.publish(library))
            }
            LoadOutcome::NoMusic => {
                info!("No music found");
                self.clear();
                LoadOutcome::NoMusic
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::music::RawSong;
    use crate::test_utils::raw_song;

    struct FailingSource;

    impl SongSource for FailingSource {
        fn rows(&self) -> Result<Vec<RawSong>> {
            Err(Error::not_found("/nowhere"))
        }
    }

    #[test]
    fn test_empty_store() {
        let store = MusicStore::new();
        assert!(store.library().is_none());
    }

    #[test]
    fn test_publish_replaces_snapshot() {
        let store = MusicStore::new();
        let first = crate::test_utils::build(vec![raw_song("One", "Album", "Artist")]);
        let held = store.publish(first);

        let second = crate::test_utils::build(vec![
            raw_song("One", "Album", "Artist"),
            raw_song("Two", "Album", "Artist"),
        ]);
        store.publish(second);

        // Old readers keep their snapshot
        assert_eq!(held.songs().len(), 1);
        assert_eq!(store.library().map(|l| l.songs().len()), Some(2));

        store.clear();
        assert!(store.library().is_none());
    }

    #[tokio::test]
    async fn test_load_publishes() {
        let store = MusicStore::new();
        let outcome = store
            .load(vec![raw_song("One", "Album", "Artist")])
            .await
            .unwrap();

        let library = outcome.library().unwrap();
        assert_eq!(library.songs().len(), 1);
        assert!(Arc::ptr_eq(&library, &store.library().unwrap()));
    }

    #[tokio::test]
    async fn test_load_empty_clears() {
        let store = MusicStore::new();
        store.publish(crate::test_utils::build(vec![raw_song("One", "Album", "Artist")]));

        let outcome = store.load(Vec::<RawSong>::new()).await.unwrap();
        assert!(outcome.is_no_music());
        assert!(store.library().is_none());
    }

    #[tokio::test]
    async fn test_load_error_keeps_previous() {
        let store = MusicStore::new();
        store.publish(crate::test_utils::build(vec![raw_song("One", "Album", "Artist")]));

        let result = store.load(FailingSource).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(store.library().is_some());
    }
}
