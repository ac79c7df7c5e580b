//! Core types for query construction.
//!
//! These are the plain-data pieces a [`QueryBuilder`](crate::query::QueryBuilder)
//! accumulates: filter conditions, sort keys, pagination, populate and field
//! selection, and an optional locale.

use serde_json::Value;

/// A filter comparison operator.
///
/// This is the closed set of operators understood by the backend's bracket
/// filter dialect. Each serializes to its `$`-prefixed wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Contained in a value set.
    In,
    /// Not contained in a value set.
    NotIn,
    /// Substring match (case-sensitive).
    Contains,
    /// Substring match (case-insensitive).
    ContainsInsensitive,
    /// Negated substring match.
    NotContains,
    /// Field is null.
    Null,
    /// Field is not null.
    NotNull,
    /// Prefix match.
    StartsWith,
    /// Suffix match.
    EndsWith,
}

impl FilterOperator {
    /// Returns the operator's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::In => "$in",
            Self::NotIn => "$notIn",
            Self::Contains => "$contains",
            Self::ContainsInsensitive => "$containsi",
            Self::NotContains => "$notContains",
            Self::Null => "$null",
            Self::NotNull => "$notNull",
            Self::StartsWith => "$startsWith",
            Self::EndsWith => "$endsWith",
        }
    }

    /// Returns `true` for set operators whose values expand to indexed keys.
    #[must_use]
    pub const fn is_set_operator(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

/// One accumulated filter condition.
///
/// `field` may be dotted (e.g. `category.id`) to address attributes of a
/// related entity; serialization turns each segment into a bracket path.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCondition {
    /// The (possibly dotted) field path.
    pub field: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The comparison value. Set operators expect an array.
    pub value: Value,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the direction's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One accumulated sort key. Insertion order determines tie-break precedence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOption {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// Requested pagination. Keys are emitted only when set; the builder injects
/// no defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaginationRequest {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Entries per page.
    pub page_size: Option<u32>,
    /// Offset-free result cap.
    pub limit: Option<u32>,
}

impl PaginationRequest {
    /// Returns `true` if no pagination key is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.page.is_none() && self.page_size.is_none() && self.limit.is_none()
    }
}

/// Instruction for expanding related entities inline.
///
/// Modeled as a closed tagged variant so serialization is exhaustive:
///
/// - [`Populate::All`] expands every direct relation (`populate=*`)
/// - [`Populate::Relations`] expands the named relations (`populate[i]=name`)
/// - [`Populate::Nested`] describes deep expansion, flattened recursively
///   into `populate[rel][populate]...` bracket paths
///
/// # Example
///
/// ```rust
/// use strapi_api::query::Populate;
///
/// let populate = Populate::nested([
///     ("category", Populate::All),
///     ("images", Populate::relations(["thumbnail"])),
/// ]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Populate {
    /// Expand all direct relations.
    All,
    /// Expand an explicit list of relations.
    Relations(Vec<String>),
    /// Deep expansion: each entry pairs a relation name with the populate
    /// instruction for that relation's own relations.
    Nested(Vec<(String, Populate)>),
}

impl Populate {
    /// Builds a [`Populate::Relations`] from anything iterable as strings.
    #[must_use]
    pub fn relations<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Relations(names.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Populate::Nested`] from relation/instruction pairs.
    #[must_use]
    pub fn nested<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Self)>,
        S: Into<String>,
    {
        Self::Nested(
            entries
                .into_iter()
                .map(|(name, populate)| (name.into(), populate))
                .collect(),
        )
    }
}

/// A declarative, plain-data query description.
///
/// Equivalent to chaining the corresponding [`QueryBuilder`] setters; consumed
/// in one call by [`QueryBuilder::from_options`].
///
/// [`QueryBuilder`]: crate::query::QueryBuilder
/// [`QueryBuilder::from_options`]: crate::query::QueryBuilder::from_options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Filter conditions, applied in order.
    pub filters: Vec<FilterCondition>,
    /// Sort keys, in tie-break order.
    pub sort: Vec<SortOption>,
    /// Pagination request.
    pub pagination: Option<PaginationRequest>,
    /// Relation expansion instruction.
    pub populate: Option<Populate>,
    /// Restrict returned fields to this list.
    pub fields: Vec<String>,
    /// Content locale tag.
    pub locale: Option<String>,
}

impl QueryOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_wire_names() {
        assert_eq!(FilterOperator::Eq.as_str(), "$eq");
        assert_eq!(FilterOperator::NotIn.as_str(), "$notIn");
        assert_eq!(FilterOperator::ContainsInsensitive.as_str(), "$containsi");
        assert_eq!(FilterOperator::NotNull.as_str(), "$notNull");
        assert_eq!(FilterOperator::StartsWith.as_str(), "$startsWith");
    }

    #[test]
    fn test_set_operators() {
        assert!(FilterOperator::In.is_set_operator());
        assert!(FilterOperator::NotIn.is_set_operator());
        assert!(!FilterOperator::Eq.is_set_operator());
        assert!(!FilterOperator::Contains.is_set_operator());
    }

    #[test]
    fn test_sort_direction_defaults_to_asc() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.as_str(), "asc");
        assert_eq!(SortDirection::Desc.as_str(), "desc");
    }

    #[test]
    fn test_pagination_request_is_empty() {
        assert!(PaginationRequest::default().is_empty());
        assert!(!PaginationRequest {
            page: Some(1),
            ..PaginationRequest::default()
        }
        .is_empty());
    }

    #[test]
    fn test_populate_constructors() {
        let relations = Populate::relations(["category", "images"]);
        assert_eq!(
            relations,
            Populate::Relations(vec!["category".to_string(), "images".to_string()])
        );

        let nested = Populate::nested([("hero", Populate::All)]);
        assert_eq!(nested, Populate::Nested(vec![("hero".to_string(), Populate::All)]));
    }
}
