//! Integration tests for the query builder's serialization dialect.
//!
//! These tests verify the deterministic bracket-notation output: filter
//! expansion, sort ordering, pagination keys, populate flattening, field
//! selection, and URL assembly.

use strapi_api::{Populate, QueryBuilder, QueryOptions, SortDirection};

fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// Empty Builder
// ============================================================================

#[test]
fn test_empty_builder_produces_unmodified_base_url() {
    assert_eq!(QueryBuilder::new().build_url("/api/products"), "/api/products");
    assert!(QueryBuilder::new().build().is_empty());
}

// ============================================================================
// Idempotent Serialization
// ============================================================================

#[test]
fn test_build_twice_yields_identical_output() {
    let builder = QueryBuilder::new()
        .where_eq("isActive", true)
        .where_in("category.id", [4, 8])
        .where_between("price", 10, 50)
        .order_by("name", SortDirection::Asc)
        .order_by_desc("createdAt")
        .paginate(2, 25)
        .populate(Populate::nested([("images", Populate::All)]))
        .select(["name", "slug", "price"])
        .locale("en-US");

    let first = builder.build();
    let second = builder.build();
    assert_eq!(first, second);

    let first_url = builder.build_url("/api/products");
    let second_url = builder.build_url("/api/products");
    assert_eq!(first_url, second_url);
}

// ============================================================================
// Filter Serialization
// ============================================================================

#[test]
fn test_where_in_round_trip() {
    let params = QueryBuilder::new().where_in("id", [1, 2, 3]).build();

    assert_eq!(params.len(), 3);
    assert_eq!(
        params,
        vec![
            ("filters[id][$in][0]".to_string(), "1".to_string()),
            ("filters[id][$in][1]".to_string(), "2".to_string()),
            ("filters[id][$in][2]".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn test_where_between_expands_to_gte_and_lte() {
    let params = QueryBuilder::new().where_between("price", 10, 50).build();

    assert_eq!(lookup(&params, "filters[price][$gte]"), Some("10"));
    assert_eq!(lookup(&params, "filters[price][$lte]"), Some("50"));
}

#[test]
fn test_where_not_in_uses_indexed_sub_keys() {
    let params = QueryBuilder::new()
        .where_not_in("status", ["draft", "archived"])
        .build();

    assert_eq!(lookup(&params, "filters[status][$notIn][0]"), Some("draft"));
    assert_eq!(lookup(&params, "filters[status][$notIn][1]"), Some("archived"));
}

#[test]
fn test_nested_relation_filters() {
    let params = QueryBuilder::new()
        .where_eq("category.slug", "green-tea")
        .build();

    assert_eq!(
        lookup(&params, "filters[category][slug][$eq]"),
        Some("green-tea")
    );
}

#[test]
fn test_contains_variants() {
    let params = QueryBuilder::new()
        .where_contains("name", "Sencha")
        .where_contains_insensitive("description", "floral")
        .build();

    assert_eq!(lookup(&params, "filters[name][$contains]"), Some("Sencha"));
    assert_eq!(
        lookup(&params, "filters[description][$containsi]"),
        Some("floral")
    );
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_keys_are_append_only_and_ordered() {
    let params = QueryBuilder::new()
        .order_by("featured", SortDirection::Desc)
        .order_by("name", SortDirection::Asc)
        .order_by_desc("createdAt")
        .build();

    assert_eq!(lookup(&params, "sort[0]"), Some("featured:desc"));
    assert_eq!(lookup(&params, "sort[1]"), Some("name:asc"));
    assert_eq!(lookup(&params, "sort[2]"), Some("createdAt:desc"));
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_no_pagination_defaults_are_injected() {
    let params = QueryBuilder::new().where_eq("id", 1).build();

    assert!(params.iter().all(|(k, _)| !k.starts_with("pagination")));
}

#[test]
fn test_limit_serializes_independently() {
    let params = QueryBuilder::new().limit(5).build();

    assert_eq!(params, vec![("pagination[limit]".to_string(), "5".to_string())]);
}

// ============================================================================
// Populate and Fields
// ============================================================================

#[test]
fn test_populate_shapes() {
    let all = QueryBuilder::new().populate_all().build();
    assert_eq!(all, vec![("populate".to_string(), "*".to_string())]);

    let relations = QueryBuilder::new()
        .populate(Populate::relations(["category", "images"]))
        .build();
    assert_eq!(lookup(&relations, "populate[0]"), Some("category"));
    assert_eq!(lookup(&relations, "populate[1]"), Some("images"));

    let nested = QueryBuilder::new()
        .populate(Populate::nested([(
            "hero",
            Populate::relations(["background", "cta"]),
        )]))
        .build();
    assert_eq!(lookup(&nested, "populate[hero][populate][0]"), Some("background"));
    assert_eq!(lookup(&nested, "populate[hero][populate][1]"), Some("cta"));
}

#[test]
fn test_fields_are_indexed() {
    let params = QueryBuilder::new().select(["name", "slug"]).build();

    assert_eq!(lookup(&params, "fields[0]"), Some("name"));
    assert_eq!(lookup(&params, "fields[1]"), Some("slug"));
}

// ============================================================================
// From Options
// ============================================================================

#[test]
fn test_from_options_is_equivalent_to_chaining() {
    use serde_json::Value;
    use strapi_api::{FilterCondition, FilterOperator, PaginationRequest, SortOption};

    let options = QueryOptions {
        filters: vec![
            FilterCondition {
                field: "isActive".to_string(),
                operator: FilterOperator::Eq,
                value: Value::Bool(true),
            },
            FilterCondition {
                field: "id".to_string(),
                operator: FilterOperator::In,
                value: serde_json::json!([1, 2]),
            },
        ],
        sort: vec![SortOption {
            field: "order".to_string(),
            direction: SortDirection::Asc,
        }],
        pagination: Some(PaginationRequest {
            page: Some(2),
            page_size: Some(10),
            limit: None,
        }),
        populate: Some(Populate::All),
        fields: vec!["name".to_string()],
        locale: Some("en".to_string()),
    };

    let chained = QueryBuilder::new()
        .where_eq("isActive", true)
        .where_in("id", [1, 2])
        .order_by("order", SortDirection::Asc)
        .page(2)
        .page_size(10)
        .populate_all()
        .select(["name"])
        .locale("en");

    assert_eq!(QueryBuilder::from_options(options).build(), chained.build());
}

// ============================================================================
// URL Assembly
// ============================================================================

#[test]
fn test_build_url_joins_with_single_question_mark() {
    let url = QueryBuilder::new().page(1).build_url("/api/products");
    assert_eq!(url, "/api/products?pagination%5Bpage%5D=1");
    assert_eq!(url.matches('?').count(), 1);
}

#[test]
fn test_build_url_encodes_reserved_characters() {
    let url = QueryBuilder::new()
        .where_eq("name", "milk & honey")
        .build_url("/api/products");

    assert!(url.contains("milk%20%26%20honey"));
    assert!(!url.contains("milk & honey"));
}
