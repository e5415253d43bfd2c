use crate::error::FetchError;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_VIEW_ID: AtomicU64 = AtomicU64::new(0);

fn next_view_id() -> u64 {
    LAST_VIEW_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Identifies one fetch: the view that issued it and that view's fetch
/// generation at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Id of the issuing view.
    pub view_id: u64,
    /// Generation of the fetch within that view.
    pub generation: u64,
}

/// Where a view's initial fetch stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet (or the view was seeded directly).
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed; the view shows the error until retried.
    Failed(FetchError),
}

/// Tracks fetches for one view and discards responses that arrive too late.
///
/// Each [`Loader::begin`] hands out a fresh [`LoadTicket`]. A response is
/// applied only if its ticket is the most recent one and the view is still
/// mounted.
///
/// # Examples
///
/// ```rust
/// use posboard::source::{Loader, LoadState};
///
/// let mut loader = Loader::new();
/// let first = loader.begin().unwrap();
/// let second = loader.begin().unwrap();
///
/// // the first response lost the race
/// assert_eq!(loader.complete(first, Ok(vec![1])), None);
/// assert_eq!(loader.complete(second, Ok(vec![2])), Some(vec![2]));
/// assert_eq!(loader.state(), &LoadState::Loaded);
///
/// // nothing starts once the view is gone
/// loader.unmount();
/// assert!(loader.begin().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    view_id: u64,
    generation: u64,
    state: LoadState,
    mounted: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// A loader for a newly mounted view, with a process-unique view id.
    pub fn new() -> Self {
        Self {
            view_id: next_view_id(),
            generation: 0,
            state: LoadState::Idle,
            mounted: true,
        }
    }

    /// The id carried by this view's tickets and messages.
    pub fn view_id(&self) -> u64 {
        self.view_id
    }

    /// Current state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// The error from the last fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// False once the view has been torn down.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Starts a new fetch, invalidating any ticket handed out before.
    ///
    /// Returns `None` and leaves the state alone once the view is unmounted.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if !self.mounted {
            tracing::debug!(view_id = self.view_id, "not loading into an unmounted view");
            return None;
        }
        self.generation += 1;
        self.state = LoadState::Loading;
        Some(LoadTicket {
            view_id: self.view_id,
            generation: self.generation,
        })
    }

    /// True if a response carrying `ticket` may still be applied.
    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        self.mounted && ticket.view_id == self.view_id && ticket.generation == self.generation
    }

    /// Marks the view as torn down; every outstanding ticket becomes stale.
    pub fn unmount(&mut self) {
        self.mounted = false;
        if self.state == LoadState::Loading {
            self.state = LoadState::Idle;
        }
    }

    /// Records the outcome of a fetch.
    ///
    /// Returns the payload only when the ticket is current and the fetch
    /// succeeded. Stale responses leave the state untouched.
    pub fn complete<T>(&mut self, ticket: LoadTicket, result: Result<T, FetchError>) -> Option<T> {
        if !self.accepts(ticket) {
            tracing::warn!(
                view_id = ticket.view_id,
                generation = ticket.generation,
                current = self.generation,
                mounted = self.mounted,
                "discarding stale response"
            );
            return None;
        }
        match result {
            Ok(payload) => {
                self.state = LoadState::Loaded;
                Some(payload)
            }
            Err(err) => {
                tracing::error!(view_id = self.view_id, error = %err, "load failed");
                self.state = LoadState::Failed(err);
                None
            }
        }
    }
}
