//! Background search front end.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::library::{Library, MusicStore};
use crate::strings::Strings;

use super::{DisplayMode, SearchItem, search_library};

/// A published search result, together with the snapshot its handles
/// belong to.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub query: Option<String>,
    pub library: Option<Arc<Library>>,
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Default)]
struct SearchState {
    last_query: Option<String>,
    filter: Option<DisplayMode>,
}

/// Runs searches against the store's current library on the blocking pool.
///
/// Results are delivered through a `watch` channel. Every call to
/// [`Searcher::search`] supersedes the previous ones: a result is dropped if
/// another search was started after it, even if it finishes last. Work in
/// flight is not cancelled.
pub struct Searcher {
    store: Arc<MusicStore>,
    strings: Arc<dyn Strings>,
    state: Mutex<SearchState>,
    generation: Arc<AtomicU64>,
    results: Arc<watch::Sender<Arc<SearchResults>>>,
}

impl Searcher {
    pub fn new(
        store: Arc<MusicStore>,
        strings: Arc<dyn Strings>,
        filter: Option<DisplayMode>,
    ) -> Self {
        let (results, _) = watch::channel(Arc::new(SearchResults::default()));
        Self {
            store,
            strings,
            state: Mutex::new(SearchState {
                last_query: None,
                filter,
            }),
            generation: Arc::new(AtomicU64::new(0)),
            results: Arc::new(results),
        }
    }

    /// Search for `query` with the current filter.
    ///
    /// With no query, an empty query or no library loaded, empty results are
    /// published immediately and `None` is returned. Otherwise the search runs
    /// on Tokio's blocking pool; the returned handle completes once its result
    /// was published or discarded. Must be called inside a Tokio runtime.
    pub fn search(&self, query: Option<&str>) -> Option<JoinHandle<()>> {
        let (generation, filter) = self.begin(query);

        let library = self.store.library();
        let (Some(query), Some(library)) = (query.filter(|q| !q.is_empty()), library) else {
            debug!("No music/query, clearing results");
            publish(
                &self.results,
                &self.generation,
                generation,
                SearchResults {
                    query: query.map(str::to_string),
                    ..SearchResults::default()
                },
            );
            return None;
        };

        debug!(query, generation, "Starting search");
        let query = query.to_string();
        let strings = Arc::clone(&self.strings);
        let sender = Arc::clone(&self.results);
        let latest = Arc::clone(&self.generation);

        Some(tokio::task::spawn_blocking(move || {
            let items = search_library(&library, &query, filter, strings.as_ref());
            let results = SearchResults {
                query: Some(query),
                library: Some(library),
                items,
            };
            if !publish(&sender, &latest, generation, results) {
                debug!(generation, "Discarded stale search result");
            }
        }))
    }

    /// Record `query` as the last one and claim its generation.
    ///
    /// Both happen under the state lock, so the newest generation always
    /// belongs to the recorded query.
    fn begin(&self, query: Option<&str>) -> (u64, Option<DisplayMode>) {
        let mut state = self.state.lock();
        state.last_query = query.map(str::to_string);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, state.filter)
    }

    /// Re-run the last query, e.g. after a reload or a filter change.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let query = self.state.lock().last_query.clone();
        self.search(query.as_deref())
    }

    /// Change the kind filter and refresh.
    pub fn set_filter(&self, filter: Option<DisplayMode>) -> Option<JoinHandle<()>> {
        debug!(?filter, "Updating filter mode");
        self.state.lock().filter = filter;
        self.refresh()
    }

    pub fn filter(&self) -> Option<DisplayMode> {
        self.state.lock().filter
    }

    /// The latest published results.
    pub fn results(&self) -> Arc<SearchResults> {
        Arc::clone(&self.results.borrow())
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SearchResults>> {
        self.results.subscribe()
    }
}

/// Publish `results` unless a newer search was started since `generation`.
fn publish(
    sender: &watch::Sender<Arc<SearchResults>>,
    latest: &AtomicU64,
    generation: u64,
    results: SearchResults,
) -> bool {
    sender.send_if_modified(|current| {
        if latest.load(Ordering::SeqCst) != generation {
            return false;
        }
        *current = Arc::new(results);
        true
    })
}
