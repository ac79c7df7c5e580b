//! Fluent query builder for the bracket filter dialect.
//!
//! [`QueryBuilder`] accumulates filter/sort/pagination/populate/field/locale
//! intent and serializes it deterministically into the query-string dialect
//! the backend understands (`filters[field][$op]=value`, `sort[i]=field:dir`,
//! and so on).
//!
//! A builder instance is meant to describe one logical request; build it,
//! serialize it, and let it go. Never share one builder across concurrent
//! requests.
//!
//! # Example
//!
//! ```rust
//! use strapi_api::query::{QueryBuilder, SortDirection};
//!
//! let url = QueryBuilder::new()
//!     .where_eq("isActive", true)
//!     .where_between("price", 10, 50)
//!     .order_by("name", SortDirection::Asc)
//!     .paginate(1, 20)
//!     .build_url("/api/products");
//!
//! assert!(url.starts_with("/api/products?"));
//! ```

use serde_json::Value;

use crate::query::types::{
    FilterCondition, FilterOperator, PaginationRequest, Populate, QueryOptions, SortDirection,
    SortOption,
};

/// Accumulates query intent and serializes it into query-string parameters.
///
/// All setters consume and return the builder for chaining. Serialization via
/// [`build`](Self::build) is a pure function of the accumulated state:
/// calling it any number of times yields identical output.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    filters: Vec<FilterCondition>,
    sorts: Vec<SortOption>,
    pagination: PaginationRequest,
    populate: Option<Populate>,
    select_fields: Vec<String>,
    locale: Option<String>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a builder from a declarative [`QueryOptions`] in one call.
    ///
    /// Equivalent to manually chaining each setter.
    #[must_use]
    pub fn from_options(options: QueryOptions) -> Self {
        let mut builder = Self::new();

        for filter in options.filters {
            builder = builder.where_(filter.field, filter.operator, filter.value);
        }
        for sort in options.sort {
            builder = builder.order_by(sort.field, sort.direction);
        }
        if let Some(pagination) = options.pagination {
            if let Some(page) = pagination.page {
                builder = builder.page(page);
            }
            if let Some(page_size) = pagination.page_size {
                builder = builder.page_size(page_size);
            }
            if let Some(limit) = pagination.limit {
                builder = builder.limit(limit);
            }
        }
        if let Some(populate) = options.populate {
            builder = builder.populate(populate);
        }
        if !options.fields.is_empty() {
            builder = builder.select(options.fields);
        }
        if let Some(locale) = options.locale {
            builder = builder.locale(locale);
        }

        builder
    }

    // -- Filters --------------------------------------------------------

    /// Appends a raw filter condition.
    #[must_use]
    pub fn where_(
        mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(FilterCondition {
            field: field.into(),
            operator,
            value: value.into(),
        });
        self
    }

    /// Filters on equality.
    #[must_use]
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_(field, FilterOperator::Eq, value)
    }

    /// Filters on inequality.
    #[must_use]
    pub fn where_ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_(field, FilterOperator::Ne, value)
    }

    /// Filters on membership in a value set.
    #[must_use]
    pub fn where_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.where_(field, FilterOperator::In, Value::Array(values))
    }

    /// Filters on exclusion from a value set.
    #[must_use]
    pub fn where_not_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.where_(field, FilterOperator::NotIn, Value::Array(values))
    }

    /// Filters on a case-sensitive substring match.
    #[must_use]
    pub fn where_contains(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.where_(field, FilterOperator::Contains, value.into())
    }

    /// Filters on a case-insensitive substring match.
    #[must_use]
    pub fn where_contains_insensitive(
        self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.where_(field, FilterOperator::ContainsInsensitive, value.into())
    }

    /// Filters on the field being null.
    #[must_use]
    pub fn where_null(self, field: impl Into<String>) -> Self {
        self.where_(field, FilterOperator::Null, true)
    }

    /// Filters on the field being non-null.
    #[must_use]
    pub fn where_not_null(self, field: impl Into<String>) -> Self {
        self.where_(field, FilterOperator::NotNull, true)
    }

    /// Filters on an inclusive range; expands to two conditions
    /// (greater-or-equal `min`, less-or-equal `max`).
    #[must_use]
    pub fn where_between(
        self,
        field: impl Into<String>,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> Self {
        let field = field.into();
        self.where_(field.clone(), FilterOperator::Gte, min)
            .where_(field, FilterOperator::Lte, max)
    }

    /// Filters on strictly-greater-than.
    #[must_use]
    pub fn where_gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_(field, FilterOperator::Gt, value)
    }

    /// Filters on strictly-less-than.
    #[must_use]
    pub fn where_lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_(field, FilterOperator::Lt, value)
    }

    // -- Sorting --------------------------------------------------------

    /// Appends a sort key. Later calls add tie-break keys; they never replace
    /// earlier ones.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts.push(SortOption {
            field: field.into(),
            direction,
        });
        self
    }

    /// Appends a descending sort key.
    #[must_use]
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, SortDirection::Desc)
    }

    // -- Pagination -----------------------------------------------------

    /// Sets the 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.pagination.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.pagination.page_size = Some(page_size);
        self
    }

    /// Sets an offset-free result cap.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Resets pagination to the given page and page size together.
    #[must_use]
    pub const fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.pagination = PaginationRequest {
            page: Some(page),
            page_size: Some(page_size),
            limit: None,
        };
        self
    }

    // -- Populate, fields, locale ---------------------------------------

    /// Sets the relation expansion instruction. Last call wins.
    #[must_use]
    pub fn populate(mut self, populate: Populate) -> Self {
        self.populate = Some(populate);
        self
    }

    /// Expands all direct relations.
    #[must_use]
    pub fn populate_all(self) -> Self {
        self.populate(Populate::All)
    }

    /// Restricts the returned fields. Last call wins.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the content locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Returns `true` if a populate instruction has been set.
    #[must_use]
    pub const fn has_populate(&self) -> bool {
        self.populate.is_some()
    }

    /// Returns `true` if a locale has been set.
    #[must_use]
    pub const fn has_locale(&self) -> bool {
        self.locale.is_some()
    }

    // -- Serialization --------------------------------------------------

    /// Serializes the accumulated state into ordered query parameters.
    ///
    /// The output is a pure function of the builder state: no hidden
    /// counters, no timestamps. Calling `build` twice yields byte-identical
    /// parameter lists.
    #[must_use]
    pub fn build(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        for filter in &self.filters {
            let mut path = String::from("filters");
            for segment in filter.field.split('.') {
                path.push('[');
                path.push_str(segment);
                path.push(']');
            }

            if filter.operator.is_set_operator() {
                let values = match &filter.value {
                    Value::Array(values) => values.clone(),
                    other => vec![other.clone()],
                };
                for (i, value) in values.iter().enumerate() {
                    params.push((
                        format!("{path}[{}][{i}]", filter.operator.as_str()),
                        value_to_string(value),
                    ));
                }
            } else {
                params.push((
                    format!("{path}[{}]", filter.operator.as_str()),
                    value_to_string(&filter.value),
                ));
            }
        }

        for (i, sort) in self.sorts.iter().enumerate() {
            params.push((
                format!("sort[{i}]"),
                format!("{}:{}", sort.field, sort.direction.as_str()),
            ));
        }

        if let Some(page) = self.pagination.page {
            params.push(("pagination[page]".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.pagination.page_size {
            params.push(("pagination[pageSize]".to_string(), page_size.to_string()));
        }
        if let Some(limit) = self.pagination.limit {
            params.push(("pagination[limit]".to_string(), limit.to_string()));
        }

        if let Some(populate) = &self.populate {
            serialize_populate(populate, &mut params);
        }

        for (i, field) in self.select_fields.iter().enumerate() {
            params.push((format!("fields[{i}]"), field.clone()));
        }

        if let Some(locale) = &self.locale {
            params.push(("locale".to_string(), locale.clone()));
        }

        params
    }

    /// Appends the serialized query to a base endpoint.
    ///
    /// Returns the endpoint unchanged when no parameter has been set; no
    /// trailing `?` is ever produced. Keys and values are percent-encoded.
    #[must_use]
    pub fn build_url(&self, base_endpoint: &str) -> String {
        let params = self.build();
        if params.is_empty() {
            return base_endpoint.to_string();
        }

        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();

        format!("{base_endpoint}?{}", query.join("&"))
    }
}

/// Renders a filter value the way the dialect expects: strings bare, scalars
/// via their display form.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flattens a populate instruction into bracket-path parameters.
fn serialize_populate(populate: &Populate, params: &mut Vec<(String, String)>) {
    match populate {
        Populate::All => params.push(("populate".to_string(), "*".to_string())),
        Populate::Relations(names) => {
            for (i, name) in names.iter().enumerate() {
                params.push((format!("populate[{i}]"), name.clone()));
            }
        }
        Populate::Nested(entries) => serialize_nested_populate(entries, "populate", params),
    }
}

fn serialize_nested_populate(
    entries: &[(String, Populate)],
    prefix: &str,
    params: &mut Vec<(String, String)>,
) {
    for (relation, sub) in entries {
        let path = format!("{prefix}[{relation}][populate]");
        match sub {
            Populate::All => params.push((path, "*".to_string())),
            Populate::Relations(names) => {
                for (i, name) in names.iter().enumerate() {
                    params.push((format!("{path}[{i}]"), name.clone()));
                }
            }
            Populate::Nested(sub_entries) => {
                serialize_nested_populate(sub_entries, &path, params);
            }
        }
    }
}
