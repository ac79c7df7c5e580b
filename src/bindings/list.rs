//! List-shaped bindings: page navigation and infinite scroll.
//!
//! [`PagedQuery`] layers page-state management on top of a
//! [`QueryHandle`], deriving `has_next_page`/`has_prev_page` from the
//! envelope's pagination metadata. [`InfiniteQuery`] instead accumulates
//! pages into one growing ordered sequence.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::bindings::query::{BoxFuture, QueryHandle, QueryState};
use crate::clients::ApiError;
use crate::rest::{ListEnvelope, Pagination};

type PageFetchFn<T> = Arc<dyn Fn(u32, u32) -> BoxFuture<ListEnvelope<T>> + Send + Sync>;

/// A query binding over one page of a list endpoint.
///
/// The fetch closure receives `(page, page_size)`; navigating to another page
/// refetches through the underlying [`QueryHandle`], so all of its lifecycle
/// guarantees (teardown suppression, stale-response discarding) apply.
///
/// # Example
///
/// ```rust,ignore
/// let products = Arc::clone(&service);
/// let list = PagedQuery::new(
///     move |page, page_size| {
///         let products = Arc::clone(&products);
///         async move { products.paginate(page, page_size, None).await }
///     },
///     1,
///     20,
/// );
///
/// if list.has_next_page() {
///     list.next_page().await;
/// }
/// ```
pub struct PagedQuery<T> {
    inner: QueryHandle<ListEnvelope<T>>,
    page: Arc<AtomicU32>,
    page_size: u32,
}

impl<T: Clone + Send + Sync + 'static> PagedQuery<T> {
    /// Creates a paged binding starting at `initial_page` and spawns the
    /// initial fetch.
    pub fn new<F, Fut>(fetch: F, initial_page: u32, page_size: u32) -> Self
    where
        F: Fn(u32, u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ListEnvelope<T>, ApiError>> + Send + 'static,
    {
        let page = Arc::new(AtomicU32::new(initial_page.max(1)));
        let current_page = Arc::clone(&page);
        let inner = QueryHandle::new(move || fetch(current_page.load(Ordering::SeqCst), page_size));

        Self {
            inner,
            page,
            page_size,
        }
    }

    /// Returns a snapshot of the underlying query state.
    #[must_use]
    pub fn state(&self) -> QueryState<ListEnvelope<T>> {
        self.inner.state()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<ListEnvelope<T>>> {
        self.inner.subscribe()
    }

    /// Returns the current page's items.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.inner
            .data()
            .and_then(ListEnvelope::into_data)
            .unwrap_or_default()
    }

    /// Returns the pagination metadata of the current response, if any.
    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        self.inner.data().and_then(|envelope| envelope.pagination().copied())
    }

    /// Returns the page this binding currently points at.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.load(Ordering::SeqCst)
    }

    /// Returns the configured page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns `true` if the envelope reports a following page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pagination().is_some_and(|p| p.has_next_page())
    }

    /// Returns `true` if the envelope reports a preceding page.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.pagination().is_some_and(|p| p.has_prev_page())
    }

    /// Navigates to an explicit page (1-based) and refetches.
    pub async fn go_to_page(&self, page: u32) {
        self.page.store(page.max(1), Ordering::SeqCst);
        self.inner.refetch().await;
    }

    /// Advances to the next page, if the envelope reports one.
    pub async fn next_page(&self) {
        if self.has_next_page() {
            self.go_to_page(self.page() + 1).await;
        }
    }

    /// Returns to the previous page, if the envelope reports one.
    pub async fn prev_page(&self) {
        if self.has_prev_page() {
            self.go_to_page(self.page().saturating_sub(1)).await;
        }
    }

    /// Re-runs the fetch for the current page.
    pub async fn refetch(&self) {
        self.inner.refetch().await;
    }
}

/// One snapshot of an infinite list's observable state.
#[derive(Clone, Debug)]
pub struct InfiniteState<T> {
    /// All items accumulated so far, in page order.
    pub items: Vec<T>,
    /// `true` while the first page (or a restart) is in flight.
    pub is_loading: bool,
    /// `true` while an appending page load is in flight.
    pub is_loading_more: bool,
    /// `true` when the most recent page load failed.
    pub is_error: bool,
    /// The error from the most recent failed page load.
    pub error: Option<ApiError>,
    /// `true` while the envelope reports further pages.
    pub has_more: bool,
}

impl<T> InfiniteState<T> {
    const fn initial() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            is_loading_more: false,
            is_error: false,
            error: None,
            has_more: true,
        }
    }
}

struct InfiniteCore<T> {
    fetch: PageFetchFn<T>,
    tx: watch::Sender<InfiniteState<T>>,
    page: AtomicU32,
    page_size: u32,
    in_flight: AtomicBool,
    alive: CancellationToken,
}

impl<T: Clone + Send + Sync + 'static> InfiniteCore<T> {
    /// Loads one page. Only one load may be in flight at a time; losers of
    /// the guard return without touching state.
    async fn fetch_page(&self, page_num: u32, append: bool) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        if self.alive.is_cancelled() {
            self.in_flight.store(false, Ordering::SeqCst);
            return;
        }

        self.tx.send_modify(|state| {
            if append {
                state.is_loading_more = true;
            } else {
                state.is_loading = true;
                state.items.clear();
            }
            state.is_error = false;
            state.error = None;
        });

        let result = (self.fetch)(page_num, self.page_size).await;

        if self.alive.is_cancelled() {
            self.in_flight.store(false, Ordering::SeqCst);
            return;
        }

        match result {
            Ok(envelope) => {
                let has_more = envelope.pagination().is_some_and(Pagination::has_next_page);
                let new_items = envelope.into_data().unwrap_or_default();
                self.page.store(page_num, Ordering::SeqCst);
                self.tx.send_modify(move |state| {
                    if append {
                        state.items.extend(new_items);
                    } else {
                        state.items = new_items;
                    }
                    state.has_more = has_more;
                    state.is_loading = false;
                    state.is_loading_more = false;
                });
            }
            Err(error) => {
                self.tx.send_modify(move |state| {
                    state.is_error = true;
                    state.error = Some(error);
                    state.is_loading = false;
                    state.is_loading_more = false;
                });
            }
        }

        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// An infinite-scroll binding that accumulates pages into one ordered list.
///
/// [`load_more`](Self::load_more) appends the next page;
/// [`refetch`](Self::refetch) discards accumulated items and restarts at page
/// 1. Concurrent `load_more` calls are guarded: while one load is in flight,
/// further calls are no-ops.
///
/// # Example
///
/// ```rust,ignore
/// let products = Arc::clone(&service);
/// let feed = InfiniteQuery::new(
///     move |page, page_size| {
///         let products = Arc::clone(&products);
///         async move { products.paginate(page, page_size, None).await }
///     },
///     10,
/// );
///
/// feed.load_more().await;
/// let state = feed.state();
/// println!("{} items, more: {}", state.items.len(), state.has_more);
/// ```
pub struct InfiniteQuery<T> {
    core: Arc<InfiniteCore<T>>,
}

impl<T: Clone + Send + Sync + 'static> InfiniteQuery<T> {
    /// Creates an infinite binding and spawns the initial page-1 fetch.
    pub fn new<F, Fut>(fetch: F, page_size: u32) -> Self
    where
        F: Fn(u32, u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ListEnvelope<T>, ApiError>> + Send + 'static,
    {
        let fetch: PageFetchFn<T> = Arc::new(move |page, size| Box::pin(fetch(page, size)));
        let (tx, _rx) = watch::channel(InfiniteState::initial());

        let core = Arc::new(InfiniteCore {
            fetch,
            tx,
            page: AtomicU32::new(1),
            page_size,
            in_flight: AtomicBool::new(false),
            alive: CancellationToken::new(),
        });

        let initial = Arc::clone(&core);
        tokio::spawn(async move {
            initial.fetch_page(1, false).await;
        });

        Self { core }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> InfiniteState<T> {
        self.core.tx.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<InfiniteState<T>> {
        self.core.tx.subscribe()
    }

    /// Appends the next page to the accumulated list.
    ///
    /// No-op when no further pages are reported or a load is already in
    /// flight.
    pub async fn load_more(&self) {
        let ready = {
            let state = self.core.tx.borrow();
            state.has_more && !state.is_loading && !state.is_loading_more
        };
        if !ready {
            return;
        }

        let next = self.core.page.load(Ordering::SeqCst) + 1;
        self.core.fetch_page(next, true).await;
    }

    /// Discards accumulated items and restarts at page 1.
    pub async fn refetch(&self) {
        self.core.fetch_page(1, false).await;
    }
}

impl<T> Drop for InfiniteQuery<T> {
    fn drop(&mut self) {
        self.core.alive.cancel();
    }
}
