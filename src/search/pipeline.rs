//! Debounced search query pipeline.
//!
//! Keystrokes land in `raw` immediately; `debounced` follows once the input
//! has been quiet for the configured window. Screens render `raw` into the
//! input field, show a spinner while the two differ, and filter against
//! `debounced`.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::SearchConfig;
use crate::notes::model::Note;

use super::filter::filter_notes;

/// Default capacity for the settled-query channel.
const SETTLED_CHANNEL_CAPACITY: usize = 64;

/// Raw and settled views of the user's query.
///
/// `debounced` is always some value `raw` previously held; it never gets
/// ahead of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// The text as typed, updated on every keystroke.
    pub raw: String,
    /// The last value that survived a full quiet period.
    pub debounced: String,
}

impl SearchQuery {
    /// True while an edit is waiting out the quiet period.
    pub fn is_searching(&self) -> bool {
        self.raw != self.debounced
    }
}

struct QueryState {
    query: SearchQuery,
    /// Bumped on every edit or clear; a timer firing only applies its
    /// update if the generation it captured is still current.
    generation: u64,
}

/// State shared with the in-flight timer task.
struct Shared {
    state: RwLock<QueryState>,
    settled_tx: broadcast::Sender<String>,
}

impl Shared {
    /// Apply the debounced value for `generation`, unless a newer edit
    /// superseded it.
    async fn settle(&self, generation: u64) {
        let settled = {
            let mut state = self.state.write().await;
            if state.generation != generation {
                return;
            }
            if state.query.raw == state.query.debounced {
                return;
            }
            state.query.debounced = state.query.raw.clone();
            state.query.debounced.clone()
        };
        debug!(query = %settled, "Search query settled");
        let _ = self.settled_tx.send(settled);
    }
}

/// Debounces a typed query and fans out settled values to subscribers.
///
/// At most one timer is outstanding per instance: arming a new one aborts
/// the previous handle, and the generation check makes a fire that slipped
/// past the abort a no-op. Each instance belongs to a single screen; there
/// is no cross-instance coordination.
pub struct SearchPipeline {
    shared: Arc<Shared>,
    timer: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl SearchPipeline {
    /// Create a pipeline with the given search configuration.
    pub fn new(config: SearchConfig) -> Self {
        let (settled_tx, _rx) = broadcast::channel(SETTLED_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(QueryState {
                    query: SearchQuery::default(),
                    generation: 0,
                }),
                settled_tx,
            }),
            timer: Mutex::new(None),
            debounce: config.debounce,
        }
    }

    /// Subscribe to settled query values.
    ///
    /// Each settled value is sent exactly once; a value that was superseded
    /// before its quiet period elapsed is never sent.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.shared.settled_tx.subscribe()
    }

    /// Record a keystroke.
    ///
    /// `raw` updates synchronously; the debounce timer restarts. If the edit
    /// brings the input back to the already-settled value there is nothing
    /// to settle, so any pending timer is simply cancelled.
    pub async fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let pending = {
            let mut state = self.shared.state.write().await;
            state.query.raw = text;
            state.generation += 1;
            (state.query.raw != state.query.debounced).then_some(state.generation)
        };
        match pending {
            Some(generation) => self.arm(generation).await,
            None => {
                debug!("Query returned to settled value, timer cancelled");
                self.cancel_timer().await;
            }
        }
    }

    /// Reset both query values to empty and cancel any pending timer.
    ///
    /// Clearing is not a search: subscribers are not notified.
    pub async fn clear(&self) {
        {
            let mut state = self.shared.state.write().await;
            state.query.raw.clear();
            state.query.debounced.clear();
            state.generation += 1;
        }
        self.cancel_timer().await;
        debug!("Search cleared");
    }

    /// Current raw and debounced values.
    pub async fn query(&self) -> SearchQuery {
        self.shared.state.read().await.query.clone()
    }

    /// The text as typed.
    pub async fn raw(&self) -> String {
        self.shared.state.read().await.query.raw.clone()
    }

    /// The last settled value.
    pub async fn debounced(&self) -> String {
        self.shared.state.read().await.query.debounced.clone()
    }

    /// True while a debounce is in flight.
    pub async fn is_searching(&self) -> bool {
        self.shared.state.read().await.query.is_searching()
    }

    /// Filter a note snapshot by the current settled query.
    pub async fn results(&self, notes: &[Note]) -> Vec<Note> {
        let debounced = self.debounced().await;
        filter_notes(notes, &debounced)
    }

    /// Start the quiet-period timer for `generation`, cancelling any
    /// previous one.
    async fn arm(&self, generation: u64) {
        let mut timer = self.timer.lock().await;
        if let Some(prev) = timer.take() {
            prev.abort();
        }
        let shared = Arc::clone(&self.shared);
        let debounce = self.debounce;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            shared.settle(generation).await;
        }));
    }

    async fn cancel_timer(&self) {
        let mut timer = self.timer.lock().await;
        if let Some(prev) = timer.take() {
            prev.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn make_pipeline(debounce_ms: u64) -> SearchPipeline {
        SearchPipeline::new(SearchConfig {
            debounce: Duration::from_millis(debounce_ms),
        })
    }

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn raw_updates_synchronously() {
        let pipeline = make_pipeline(300);
        pipeline.set_query("mee").await;
        assert_eq!(pipeline.raw().await, "mee");
        assert_eq!(pipeline.debounced().await, "");
        assert!(pipeline.is_searching().await);
    }

    #[tokio::test(start_paused = true)]
    async fn settles_after_quiet_period() {
        let pipeline = make_pipeline(300);
        pipeline.set_query("meet").await;

        wait(299).await;
        assert_eq!(pipeline.debounced().await, "");

        wait(2).await;
        assert_eq!(pipeline.debounced().await, "meet");
        assert!(!pipeline.is_searching().await);
    }

    #[tokio::test(start_paused = true)]
    async fn last_edit_wins() {
        let pipeline = make_pipeline(300);
        let mut settled = pipeline.subscribe();

        pipeline.set_query("a").await;
        wait(50).await;
        pipeline.set_query("ab").await;

        wait(301).await;
        assert_eq!(pipeline.debounced().await, "ab");

        // Exactly one notification, for the final value only.
        assert_eq!(settled.try_recv().unwrap(), "ab");
        assert!(matches!(settled.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn notifies_once_per_settled_value() {
        let pipeline = make_pipeline(300);
        let mut settled = pipeline.subscribe();

        pipeline.set_query("meet").await;
        wait(301).await;
        pipeline.set_query("meeting").await;
        wait(301).await;

        assert_eq!(settled.try_recv().unwrap(), "meet");
        assert_eq!(settled.try_recv().unwrap(), "meeting");
        assert!(matches!(settled.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_resets_everything() {
        let pipeline = make_pipeline(300);
        let mut settled = pipeline.subscribe();

        pipeline.set_query("meet").await;
        wait(100).await;
        pipeline.clear().await;

        let query = pipeline.query().await;
        assert_eq!(query.raw, "");
        assert_eq!(query.debounced, "");
        assert!(!query.is_searching());

        // The cancelled timer must never fire.
        wait(500).await;
        assert_eq!(pipeline.debounced().await, "");
        assert!(matches!(settled.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn reverting_to_settled_value_cancels_pending() {
        let pipeline = make_pipeline(300);
        let mut settled = pipeline.subscribe();

        pipeline.set_query("a").await;
        wait(301).await;
        assert_eq!(settled.try_recv().unwrap(), "a");

        pipeline.set_query("ab").await;
        assert!(pipeline.is_searching().await);
        pipeline.set_query("a").await;
        assert!(!pipeline.is_searching().await);

        // No second notification for "a".
        wait(500).await;
        assert!(matches!(settled.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_debounce_settles_next_tick() {
        let pipeline = make_pipeline(0);
        pipeline.set_query("now").await;
        wait(1).await;
        assert_eq!(pipeline.debounced().await, "now");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_string_edits_are_safe() {
        let pipeline = make_pipeline(300);
        pipeline.set_query("a").await;
        wait(301).await;

        pipeline.set_query("").await;
        assert!(pipeline.is_searching().await);
        wait(301).await;
        assert_eq!(pipeline.debounced().await, "");
        assert!(!pipeline.is_searching().await);
    }

    #[tokio::test(start_paused = true)]
    async fn results_use_settled_query() {
        use crate::notes::model::{Note, NoteKind};

        let pipeline = make_pipeline(300);
        let notes = vec![
            Note::new("Meeting Notes", NoteKind::Audio),
            Note::new("Shopping List", NoteKind::Text),
        ];

        pipeline.set_query("meet").await;
        // Still in flight: results reflect the old (empty) settled value.
        assert_eq!(pipeline.results(&notes).await.len(), 2);

        wait(301).await;
        let results = pipeline.results(&notes).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Meeting Notes");
    }
}
