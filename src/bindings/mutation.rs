//! Observable mutation state over an async operation.
//!
//! [`MutationHandle`] wraps a side-effecting operation (create, update,
//! delete, login, ...) with observable `{data, is_loading, is_error,
//! is_success, error}` state. Two invocation styles are offered:
//! [`mutate_async`](MutationHandle::mutate_async) propagates the error to the
//! caller, while [`mutate`](MutationHandle::mutate) swallows it and resolves
//! to `None` for fire-and-forget UI flows.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::bindings::query::{BoxFuture, ErrorCallback};
use crate::clients::ApiError;

type MutateFn<T, V> = Arc<dyn Fn(V) -> BoxFuture<T> + Send + Sync>;

/// One snapshot of a mutation's observable state.
#[derive(Clone, Debug)]
pub struct MutationState<T> {
    /// The payload of the most recent successful invocation.
    pub data: Option<T>,
    /// `true` while an invocation is in flight.
    pub is_loading: bool,
    /// `true` when the most recent invocation failed.
    pub is_error: bool,
    /// `true` when the most recent invocation succeeded.
    pub is_success: bool,
    /// The error from the most recent failed invocation.
    pub error: Option<ApiError>,
}

impl<T> MutationState<T> {
    const fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
            is_success: false,
            error: None,
        }
    }
}

/// Binds an async operation to observable mutation state.
///
/// # Example
///
/// ```rust,ignore
/// use strapi_api::bindings::MutationHandle;
///
/// let contact = Arc::clone(&service);
/// let submit = MutationHandle::new(move |input: ContactForm| {
///     let contact = Arc::clone(&contact);
///     async move { contact.create(&input).await }
/// });
///
/// // Fire-and-forget: errors land in state only.
/// submit.mutate(form).await;
/// ```
pub struct MutationHandle<T, V> {
    op: MutateFn<T, V>,
    tx: watch::Sender<MutationState<T>>,
    on_success: Option<Arc<dyn Fn(&T) + Send + Sync>>,
    on_error: Option<ErrorCallback>,
    on_settled: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<T, V> MutationHandle<T, V>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a handle around an async operation.
    pub fn new<F, Fut>(op: F) -> Self
    where
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let op: MutateFn<T, V> = Arc::new(move |variables| Box::pin(op(variables)));
        let (tx, _rx) = watch::channel(MutationState::idle());

        Self {
            op,
            tx,
            on_success: None,
            on_error: None,
            on_settled: None,
        }
    }

    /// Registers a callback fired after each successful invocation.
    #[must_use]
    pub fn on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Registers a callback fired exactly once per failed invocation.
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Registers a callback fired after every invocation, success or failure.
    #[must_use]
    pub fn on_settled(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_settled = Some(Arc::new(callback));
        self
    }

    /// Invokes the operation, propagating the error to the caller.
    ///
    /// State transitions to loading for the duration of the call, then to
    /// success or error.
    ///
    /// # Errors
    ///
    /// Returns the operation's [`ApiError`] unchanged.
    pub async fn mutate_async(&self, variables: V) -> Result<T, ApiError> {
        self.tx.send_modify(|state| {
            state.is_loading = true;
            state.is_error = false;
            state.is_success = false;
            state.error = None;
        });

        let result = (self.op)(variables).await;

        match &result {
            Ok(data) => {
                if let Some(callback) = &self.on_success {
                    callback(data);
                }
                let data = data.clone();
                self.tx.send_modify(move |state| {
                    state.data = Some(data);
                    state.is_success = true;
                    state.is_loading = false;
                });
            }
            Err(error) => {
                if let Some(callback) = &self.on_error {
                    callback(error);
                }
                let error = error.clone();
                self.tx.send_modify(move |state| {
                    state.is_error = true;
                    state.error = Some(error);
                    state.is_loading = false;
                });
            }
        }

        if let Some(callback) = &self.on_settled {
            callback();
        }

        result
    }

    /// Invokes the operation, swallowing any error.
    ///
    /// Resolves to `None` on failure; the error is still captured into state
    /// and fed to the error callback.
    pub async fn mutate(&self, variables: V) -> Option<T> {
        self.mutate_async(variables).await.ok()
    }

    /// Clears all mutation state back to idle.
    pub fn reset(&self) {
        self.tx.send_replace(MutationState::idle());
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> MutationState<T> {
        self.tx.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MutationState<T>> {
        self.tx.subscribe()
    }
}
