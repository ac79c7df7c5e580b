//! Observable query state over an async fetch.
//!
//! [`QueryHandle`] adapts an asynchronous fetch (typically a service call)
//! into observable `{data, is_loading, is_fetching, is_error, error}` state
//! for a UI layer, with correct lifecycle handling: updates are suppressed
//! after teardown, and a request-generation token guards against a stale
//! response overwriting fresher state.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::clients::ApiError;

/// A boxed fetch future, as stored by the binding layer.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

pub(crate) type ErrorCallback = Arc<dyn Fn(&ApiError) + Send + Sync>;

type FetchFn<T> = Arc<dyn Fn() -> BoxFuture<T> + Send + Sync>;

/// One snapshot of a query's observable state.
///
/// The state machine runs idle → loading → {success, error}. `is_fetching` is
/// `true` during any in-flight fetch; `is_loading` only until the first
/// result lands, which is what distinguishes an initial load from a
/// stale-while-revalidate refetch.
#[derive(Clone, Debug)]
pub struct QueryState<T> {
    /// The most recent successful payload.
    pub data: Option<T>,
    /// `true` until the first result (success or error) lands.
    pub is_loading: bool,
    /// `true` while any fetch is in flight.
    pub is_fetching: bool,
    /// `true` when the most recent attempt failed.
    pub is_error: bool,
    /// The error from the most recent failed attempt.
    pub error: Option<ApiError>,
}

impl<T> QueryState<T> {
    fn initial(enabled: bool) -> Self {
        Self {
            data: None,
            is_loading: enabled,
            is_fetching: false,
            is_error: false,
            error: None,
        }
    }

    /// Returns `true` once a successful payload is present and no error is
    /// pending.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.data.is_some() && !self.is_error
    }
}

/// Configuration for a [`QueryHandle`].
#[derive(Clone)]
pub struct QueryConfig {
    /// When `false`, the handle starts idle and never fetches on its own.
    pub enabled: bool,
    /// Re-run the fetch on this cadence while the handle is alive.
    pub refetch_interval: Option<Duration>,
    on_error: Option<ErrorCallback>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refetch_interval: None,
            on_error: None,
        }
    }
}

impl QueryConfig {
    /// Creates the default configuration (enabled, no polling).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the handle idle; no fetch runs until `refetch` is called on an
    /// enabled handle.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Re-runs the fetch on the given cadence while the handle is alive.
    #[must_use]
    pub const fn refetch_interval(mut self, every: Duration) -> Self {
        self.refetch_interval = Some(every);
        self
    }

    /// Registers a callback fired exactly once per failed attempt.
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

struct QueryCore<T> {
    fetch: FetchFn<T>,
    tx: watch::Sender<QueryState<T>>,
    generation: AtomicU64,
    alive: CancellationToken,
    enabled: bool,
    on_error: Option<ErrorCallback>,
}

impl<T: Clone + Send + Sync + 'static> QueryCore<T> {
    async fn run_fetch(self: Arc<Self>) {
        if !self.enabled || self.alive.is_cancelled() {
            return;
        }

        // Claim a generation token; only the holder of the newest token may
        // apply its result.
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.tx.send_modify(|state| {
            state.is_fetching = true;
            state.is_error = false;
            state.error = None;
        });

        let result = (self.fetch)().await;

        if self.alive.is_cancelled() {
            return;
        }
        if self.generation.load(Ordering::SeqCst) != my_generation {
            tracing::debug!("discarding stale query result");
            return;
        }

        match result {
            Ok(data) => self.tx.send_modify(|state| {
                state.data = Some(data);
                state.is_loading = false;
                state.is_fetching = false;
            }),
            Err(error) => {
                if let Some(callback) = &self.on_error {
                    callback(&error);
                }
                self.tx.send_modify(|state| {
                    state.is_error = true;
                    state.error = Some(error);
                    state.is_loading = false;
                    state.is_fetching = false;
                });
            }
        }
    }
}

/// Binds an async fetch to observable state.
///
/// Construction spawns the initial fetch (unless disabled). Errors never
/// propagate out of this layer; they land in [`QueryState::error`] and fire
/// the configured error callback. Dropping the handle suppresses any pending
/// state update.
///
/// # Example
///
/// ```rust,ignore
/// use strapi_api::bindings::QueryHandle;
///
/// let products = Arc::clone(&service);
/// let query = QueryHandle::new(move || {
///     let products = Arc::clone(&products);
///     async move { products.get_all(None).await }
/// });
///
/// let mut rx = query.subscribe();
/// while rx.changed().await.is_ok() {
///     let state = rx.borrow().clone();
///     if !state.is_loading {
///         break;
///     }
/// }
/// ```
pub struct QueryHandle<T> {
    core: Arc<QueryCore<T>>,
}

impl<T: Clone + Send + Sync + 'static> QueryHandle<T> {
    /// Creates a handle with the default configuration and spawns the
    /// initial fetch.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self::with_config(fetch, QueryConfig::default())
    }

    /// Creates a handle with an explicit configuration.
    pub fn with_config<F, Fut>(fetch: F, config: QueryConfig) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let fetch: FetchFn<T> = Arc::new(move || Box::pin(fetch()));
        let (tx, _rx) = watch::channel(QueryState::initial(config.enabled));

        let core = Arc::new(QueryCore {
            fetch,
            tx,
            generation: AtomicU64::new(0),
            alive: CancellationToken::new(),
            enabled: config.enabled,
            on_error: config.on_error,
        });

        if config.enabled {
            tokio::spawn(Arc::clone(&core).run_fetch());

            if let Some(every) = config.refetch_interval {
                Self::spawn_polling(Arc::clone(&core), every);
            }
        }

        Self { core }
    }

    fn spawn_polling(core: Arc<QueryCore<T>>, every: Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the initial
            // fetch is not doubled.
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = core.alive.cancelled() => break,
                    _ = ticker.tick() => Arc::clone(&core).run_fetch().await,
                }
            }
            tracing::debug!("query polling loop stopped");
        });
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> QueryState<T> {
        self.core.tx.borrow().clone()
    }

    /// Returns the most recent successful payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<T> {
        self.core.tx.borrow().data.clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.core.tx.subscribe()
    }

    /// Re-runs the fetch and waits for it to settle.
    ///
    /// Existing `data` is kept until the new result resolves
    /// (stale-while-revalidate); `is_fetching` distinguishes the refetch from
    /// an initial load. If a newer refetch starts while this one is in
    /// flight, the older result is discarded.
    pub async fn refetch(&self) {
        Arc::clone(&self.core).run_fetch().await;
    }

    /// Tears the binding down explicitly; equivalent to dropping the handle.
    ///
    /// Pending state updates are suppressed and the polling loop (if any)
    /// exits. The underlying network request is abandoned, not aborted.
    pub fn teardown(&self) {
        self.core.alive.cancel();
    }
}

impl<T> Drop for QueryHandle<T> {
    fn drop(&mut self) {
        self.core.alive.cancel();
    }
}
