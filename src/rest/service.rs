//! Generic CRUD service over one collection endpoint.
//!
//! [`ResourceService`] gives each domain resource (products, categories,
//! testimonials, ...) list/get/create/update/delete/search/paginate
//! operations without re-implementing HTTP logic. It is built entirely from
//! the transport and the query builder.

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::clients::{ApiError, HttpClient};
use crate::query::{PaginationRequest, Populate, QueryBuilder, QueryOptions, SortDirection};
use crate::rest::envelope::{Envelope, ListEnvelope};

/// A generic CRUD client bound to one named collection endpoint.
///
/// The type parameter is the entity shape; any `DeserializeOwned` type with
/// (at least) an `id` works. Each service carries a default [`Populate`]
/// policy: every operation that doesn't receive an explicit populate falls
/// back to it, so callers never get unpopulated relations by surprise.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use strapi_api::rest::ResourceService;
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct Product {
///     id: u64,
///     name: String,
///     slug: String,
/// }
///
/// let products: ResourceService<Product> = ResourceService::new(client, "/products");
/// let all = products.get_all(None).await?;
/// let one = products.get_by_slug("jasmine-pearl", None).await?;
/// ```
#[derive(Debug)]
pub struct ResourceService<T> {
    client: Arc<HttpClient>,
    endpoint: String,
    default_populate: Populate,
    default_locale: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> ResourceService<T>
where
    T: DeserializeOwned + Send + Sync,
{
    /// Creates a service for the given collection endpoint (e.g. `/products`).
    ///
    /// The default populate policy is [`Populate::All`].
    #[must_use]
    pub fn new(client: Arc<HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            default_populate: Populate::All,
            default_locale: None,
            _entity: PhantomData,
        }
    }

    /// Overrides the default populate policy.
    #[must_use]
    pub fn with_default_populate(mut self, populate: Populate) -> Self {
        self.default_populate = populate;
        self
    }

    /// Sets a locale applied whenever the caller specifies none.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Returns the collection endpoint this service is bound to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn collection_url(&self) -> String {
        format!("/api{}", self.endpoint)
    }

    fn entity_url(&self, id: impl Display) -> String {
        format!("/api{}/{id}", self.endpoint)
    }

    /// Builds a query from caller options, filling in the service defaults
    /// for populate and locale wherever the caller left them unset.
    fn query_from(&self, options: Option<QueryOptions>) -> QueryBuilder {
        let mut query = options.map_or_else(QueryBuilder::new, QueryBuilder::from_options);
        if !query.has_populate() {
            query = query.populate(self.default_populate.clone());
        }
        if !query.has_locale() {
            if let Some(locale) = &self.default_locale {
                query = query.locale(locale.clone());
            }
        }
        query
    }

    // -- CRUD -----------------------------------------------------------

    /// Fetches all entities matching the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_all(&self, options: Option<QueryOptions>) -> Result<ListEnvelope<T>, ApiError> {
        let url = self.query_from(options).build_url(&self.collection_url());
        self.client.get(&url).await
    }

    /// Fetches a single entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure, including a
    /// structured 404 when the entity does not exist.
    pub async fn get_by_id(
        &self,
        id: impl Display + Send,
        populate: Option<Populate>,
    ) -> Result<Envelope<T>, ApiError> {
        let mut query = QueryBuilder::new()
            .populate(populate.unwrap_or_else(|| self.default_populate.clone()));
        if let Some(locale) = &self.default_locale {
            query = query.locale(locale.clone());
        }

        let url = query.build_url(&self.entity_url(id));
        self.client.get(&url).await
    }

    /// Fetches entities whose `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_by_field(
        &self,
        field: &str,
        value: impl Into<serde_json::Value> + Send,
        options: Option<QueryOptions>,
    ) -> Result<ListEnvelope<T>, ApiError> {
        let url = self
            .query_from(options)
            .where_eq(field, value)
            .build_url(&self.collection_url());
        self.client.get(&url).await
    }

    /// Fetches the first entity whose `slug` matches, or `None`.
    ///
    /// "Found nothing" is signalled via `None` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_by_slug(
        &self,
        slug: &str,
        populate: Option<Populate>,
    ) -> Result<Option<T>, ApiError> {
        let mut query = QueryBuilder::new().where_eq("slug", slug);
        query = query.populate(populate.unwrap_or_else(|| self.default_populate.clone()));
        if let Some(locale) = &self.default_locale {
            query = query.locale(locale.clone());
        }

        let url = query.build_url(&self.collection_url());
        let envelope: ListEnvelope<T> = self.client.get(&url).await?;
        Ok(envelope.into_first())
    }

    /// Creates a new entity. The payload is submitted wrapped as
    /// `{"data": input}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure, including
    /// structured validation errors.
    pub async fn create<S>(&self, input: &S) -> Result<Envelope<T>, ApiError>
    where
        S: Serialize + Sync,
    {
        let body = serde_json::to_value(input)
            .map_err(|e| ApiError::decode(format!("Failed to serialize input: {e}")))?;
        self.client
            .post(&self.collection_url(), json!({ "data": body }))
            .await
    }

    /// Updates an existing entity. The payload is submitted wrapped as
    /// `{"data": input}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn update<S>(
        &self,
        id: impl Display + Send,
        input: &S,
    ) -> Result<Envelope<T>, ApiError>
    where
        S: Serialize + Sync,
    {
        let body = serde_json::to_value(input)
            .map_err(|e| ApiError::decode(format!("Failed to serialize input: {e}")))?;
        self.client
            .put(&self.entity_url(id), json!({ "data": body }))
            .await
    }

    /// Deletes an entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn delete(&self, id: impl Display + Send) -> Result<Envelope<T>, ApiError> {
        self.client.delete(&self.entity_url(id)).await
    }

    // -- Query helpers --------------------------------------------------

    /// Fetches one page of entities.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn paginate(
        &self,
        page: u32,
        page_size: u32,
        options: Option<QueryOptions>,
    ) -> Result<ListEnvelope<T>, ApiError> {
        let mut options = options.unwrap_or_default();
        options.pagination = Some(PaginationRequest {
            page: Some(page),
            page_size: Some(page_size),
            limit: None,
        });
        self.get_all(Some(options)).await
    }

    /// Case-insensitive substring search on one field.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn search(
        &self,
        field: &str,
        term: &str,
        options: Option<QueryOptions>,
    ) -> Result<ListEnvelope<T>, ApiError> {
        let url = self
            .query_from(options)
            .where_contains_insensitive(field, term)
            .build_url(&self.collection_url());
        self.client.get(&url).await
    }

    /// Fetches entities whose conventional `isActive` flag is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_active(&self, options: Option<QueryOptions>) -> Result<ListEnvelope<T>, ApiError> {
        let url = self
            .query_from(options)
            .where_eq("isActive", true)
            .build_url(&self.collection_url());
        self.client.get(&url).await
    }

    /// Fetches entities sorted by the conventional `order` field, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_ordered(&self, options: Option<QueryOptions>) -> Result<ListEnvelope<T>, ApiError> {
        self.get_ordered_by("order", SortDirection::Asc, options).await
    }

    /// Fetches entities sorted by an explicit field and direction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn get_ordered_by(
        &self,
        field: &str,
        direction: SortDirection,
        options: Option<QueryOptions>,
    ) -> Result<ListEnvelope<T>, ApiError> {
        let url = self
            .query_from(options)
            .order_by(field, direction)
            .build_url(&self.collection_url());
        self.client.get(&url).await
    }

    /// Counts entities matching the options.
    ///
    /// Performs a single-entry fetch and reads `meta.pagination.total`,
    /// returning 0 when the metadata is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or server failure.
    pub async fn count(&self, options: Option<QueryOptions>) -> Result<u64, ApiError> {
        let mut options = options.unwrap_or_default();
        options.pagination = Some(PaginationRequest {
            page: None,
            page_size: Some(1),
            limit: None,
        });

        let envelope = self.get_all(Some(options)).await?;
        Ok(envelope.pagination().map_or(0, |p| p.total))
    }
}
