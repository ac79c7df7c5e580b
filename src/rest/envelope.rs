//! Response envelope types.
//!
//! Every resource response from the backend arrives wrapped in the same
//! `{data, meta, error}` shape. This layer consumes that envelope; it never
//! produces one. Exactly one of `data` (on success) or `error` (on failure)
//! is meaningful, and `meta.pagination` is present only for list-shaped
//! responses.

use serde::Deserialize;
use serde_json::Value;

/// Pagination metadata for a list-shaped response.
///
/// `page` is 1-based; `page_count` is `ceil(total / page_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The 1-based page number of this response.
    pub page: u32,
    /// Entries per page.
    pub page_size: u32,
    /// Total number of pages.
    pub page_count: u32,
    /// Total number of entries across all pages.
    pub total: u64,
}

impl Pagination {
    /// Returns `true` if a page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.page_count
    }

    /// Returns `true` if a page precedes this one.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}

/// Response metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseMeta {
    /// Pagination, present only for list-shaped responses.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A structured error carried inside an envelope body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorInfo {
    /// The HTTP status the backend associated with the failure.
    pub status: u16,
    /// The machine-readable error name.
    pub name: String,
    /// The human-readable message.
    pub message: String,
    /// Additional structured details, if any.
    #[serde(default)]
    pub details: Option<Value>,
}

/// The `{data, meta, error}` wrapper returned for every resource response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    /// The payload, present on success.
    pub data: Option<T>,
    /// Response metadata.
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
    /// A structured error, present on failure.
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// An envelope wrapping a list of entities.
pub type ListEnvelope<T> = Envelope<Vec<T>>;

impl<T> Envelope<T> {
    /// Creates a success envelope around a payload. Mostly useful in tests
    /// and fixtures.
    #[must_use]
    pub const fn of(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
        }
    }

    /// Returns the pagination metadata, if present.
    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.as_ref().and_then(|meta| meta.pagination.as_ref())
    }

    /// Consumes the envelope and returns the payload.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T> Envelope<Vec<T>> {
    /// Returns the list payload as a slice, empty when `data` is absent.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Consumes the envelope and returns the first entry, if any.
    #[must_use]
    pub fn into_first(self) -> Option<T> {
        self.data.and_then(|items| items.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Tea {
        id: u64,
        name: String,
    }

    #[test]
    fn test_list_envelope_deserializes_data_and_pagination() {
        let envelope: ListEnvelope<Tea> = serde_json::from_value(json!({
            "data": [
                {"id": 1, "name": "Sencha"},
                {"id": 2, "name": "Assam"}
            ],
            "meta": {
                "pagination": {"page": 1, "pageSize": 2, "pageCount": 5, "total": 10}
            }
        }))
        .unwrap();

        assert_eq!(envelope.items().len(), 2);
        let pagination = envelope.pagination().unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.page_count, 5);
        assert_eq!(pagination.total, 10);
    }

    #[test]
    fn test_single_envelope_without_meta() {
        let envelope: Envelope<Tea> = serde_json::from_value(json!({
            "data": {"id": 3, "name": "Darjeeling"}
        }))
        .unwrap();

        assert!(envelope.pagination().is_none());
        assert_eq!(envelope.into_data().unwrap().name, "Darjeeling");
    }

    #[test]
    fn test_error_envelope_deserializes_without_data() {
        let envelope: Envelope<Tea> = serde_json::from_value(json!({
            "data": null,
            "error": {"status": 404, "name": "NotFoundError", "message": "Not Found"}
        }))
        .unwrap();

        assert!(envelope.data.is_none());
        let error = envelope.error.unwrap();
        assert_eq!(error.status, 404);
        assert_eq!(error.name, "NotFoundError");
    }

    #[test]
    fn test_pagination_boundaries() {
        let first = Pagination {
            page: 1,
            page_size: 10,
            page_count: 3,
            total: 25,
        };
        assert!(first.has_next_page());
        assert!(!first.has_prev_page());

        let last = Pagination {
            page: 3,
            page_size: 10,
            page_count: 3,
            total: 25,
        };
        assert!(!last.has_next_page());
        assert!(last.has_prev_page());
    }

    #[test]
    fn test_into_first_takes_the_first_entry() {
        let envelope = ListEnvelope::of(vec![
            Tea {
                id: 1,
                name: "Sencha".to_string(),
            },
            Tea {
                id: 2,
                name: "Assam".to_string(),
            },
        ]);

        assert_eq!(envelope.into_first().unwrap().id, 1);

        let empty: ListEnvelope<Tea> = Envelope::of(vec![]);
        assert!(empty.into_first().is_none());
    }

    #[test]
    fn test_items_is_empty_when_data_absent() {
        let envelope: ListEnvelope<Tea> = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.items().is_empty());
    }
}
