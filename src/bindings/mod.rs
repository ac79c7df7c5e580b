//! Reactive query/mutation bindings.
//!
//! This module adapts asynchronous fetches and mutations into observable
//! state a UI layer can subscribe to, with correct lifecycle handling:
//!
//! - **[`QueryHandle`]**: loading/fetching/error state with
//!   stale-while-revalidate refetch, optional polling, and teardown-safe
//!   updates
//! - **[`MutationHandle`]**: `mutate` (error-swallowing) and `mutate_async`
//!   (error-propagating) invocation styles plus `reset`
//! - **[`PagedQuery`]**: page navigation with `has_next_page`/`has_prev_page`
//!   derived from envelope pagination
//! - **[`InfiniteQuery`]**: infinite scroll accumulation with guarded
//!   `load_more`
//!
//! Errors are never thrown into the consumer; they are captured into state,
//! with optional callbacks fired exactly once per failed attempt.

mod list;
mod mutation;
mod query;

pub use list::{InfiniteQuery, InfiniteState, PagedQuery};
pub use mutation::{MutationHandle, MutationState};
pub use query::{BoxFuture, QueryConfig, QueryHandle, QueryState};
