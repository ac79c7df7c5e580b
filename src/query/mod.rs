//! Query construction for the bracket filter dialect.
//!
//! This module provides the [`QueryBuilder`] and its supporting plain-data
//! types. The builder accumulates request intent (filters, sorts, pagination,
//! relation expansion, field selection, locale) and serializes it
//! deterministically into the query-string dialect the backend expects.
//!
//! # Example
//!
//! ```rust
//! use strapi_api::query::{Populate, QueryBuilder};
//!
//! let url = QueryBuilder::new()
//!     .where_eq("category.slug", "green-tea")
//!     .order_by_desc("createdAt")
//!     .paginate(1, 20)
//!     .populate(Populate::relations(["images"]))
//!     .build_url("/api/products");
//! ```

mod builder;
mod types;

pub use builder::QueryBuilder;
pub use types::{
    FilterCondition, FilterOperator, PaginationRequest, Populate, QueryOptions, SortDirection,
    SortOption,
};
