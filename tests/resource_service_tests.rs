//! Integration tests for the generic resource service.
//!
//! These tests verify the CRUD surface against a mock server: default
//! populate fallback, slug lookup, `{data}` payload wrapping, pagination
//! sugar, search filters, and counting.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use strapi_api::{
    AuthContext, BaseUrl, HttpClient, Populate, QueryOptions, ResourceService, StrapiConfig,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Product {
    id: u64,
    name: String,
    slug: String,
}

fn service_for(server: &MockServer) -> ResourceService<Product> {
    let config = StrapiConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = Arc::new(HttpClient::new(&config, AuthContext::shared()));
    ResourceService::new(client, "/products")
}

fn product_json(id: u64, name: &str, slug: &str) -> serde_json::Value {
    json!({"id": id, "name": name, "slug": slug})
}

// ============================================================================
// get_all
// ============================================================================

#[tokio::test]
async fn test_get_all_applies_default_populate() {
    let server = MockServer::start().await;
    // The mock only matches when the service's default populate parameter is
    // present in the URL.
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [product_json(1, "Sencha", "sencha")],
            "meta": {"pagination": {"page": 1, "pageSize": 25, "pageCount": 1, "total": 1}}
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let envelope = service.get_all(None).await.unwrap();

    assert_eq!(envelope.items().len(), 1);
    assert_eq!(envelope.items()[0].name, "Sencha");
    assert_eq!(envelope.pagination().unwrap().total, 1);
}

#[tokio::test]
async fn test_get_all_respects_caller_populate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("populate[0]", "category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let options = QueryOptions {
        populate: Some(Populate::relations(["category"])),
        ..QueryOptions::default()
    };
    let envelope = service.get_all(Some(options)).await.unwrap();

    assert!(envelope.items().is_empty());
}

// ============================================================================
// get_by_id / get_by_field / get_by_slug
// ============================================================================

#[tokio::test]
async fn test_get_by_id_hits_entity_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/42"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": product_json(42, "Gyokuro", "gyokuro")
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let envelope = service.get_by_id(42, None).await.unwrap();

    assert_eq!(envelope.into_data().unwrap().id, 42);
}

#[tokio::test]
async fn test_get_by_field_adds_equals_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("filters[featured][$eq]", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [product_json(1, "Sencha", "sencha")]
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let envelope = service.get_by_field("featured", true, None).await.unwrap();

    assert_eq!(envelope.items().len(), 1);
}

#[tokio::test]
async fn test_get_by_slug_returns_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("filters[slug][$eq]", "sencha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [product_json(1, "Sencha", "sencha"), product_json(2, "Sencha Superior", "sencha")]
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let product = service.get_by_slug("sencha", None).await.unwrap();

    assert_eq!(product.unwrap().id, 1);
}

#[tokio::test]
async fn test_get_by_slug_signals_not_found_with_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let product = service.get_by_slug("no-such-tea", None).await.unwrap();

    assert!(product.is_none());
}

// ============================================================================
// create / update / delete
// ============================================================================

#[tokio::test]
async fn test_create_wraps_payload_in_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({"data": {"name": "Matcha", "slug": "matcha"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": product_json(9, "Matcha", "matcha")
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let input = json!({"name": "Matcha", "slug": "matcha"});
    let envelope = service.create(&input).await.unwrap();

    assert_eq!(envelope.into_data().unwrap().id, 9);
}

#[tokio::test]
async fn test_update_wraps_payload_in_data() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/products/9"))
        .and(body_json(json!({"data": {"name": "Ceremonial Matcha"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": product_json(9, "Ceremonial Matcha", "matcha")
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let input = json!({"name": "Ceremonial Matcha"});
    let envelope = service.update(9, &input).await.unwrap();

    assert_eq!(envelope.into_data().unwrap().name, "Ceremonial Matcha");
}

#[tokio::test]
async fn test_delete_hits_entity_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": product_json(9, "Matcha", "matcha")
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let envelope = service.delete(9).await.unwrap();

    assert_eq!(envelope.into_data().unwrap().id, 9);
}

#[tokio::test]
async fn test_create_propagates_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"status": 400, "name": "ValidationError", "message": "name is required"}
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let error = service.create(&json!({})).await.unwrap_err();

    assert_eq!(error.code(), "ValidationError");
    assert_eq!(error.message(), "name is required");
}

// ============================================================================
// Query helpers
// ============================================================================

#[tokio::test]
async fn test_paginate_prefills_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("pagination[page]", "3"))
        .and(query_param("pagination[pageSize]", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "meta": {"pagination": {"page": 3, "pageSize": 12, "pageCount": 5, "total": 55}}
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let envelope = service.paginate(3, 12, None).await.unwrap();

    let pagination = envelope.pagination().unwrap();
    assert_eq!(pagination.page, 3);
    assert!(pagination.has_next_page());
    assert!(pagination.has_prev_page());
}

#[tokio::test]
async fn test_search_uses_case_insensitive_contains() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("filters[name][$containsi]", "sencha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [product_json(1, "Sencha", "sencha")]
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let envelope = service.search("name", "sencha", None).await.unwrap();

    assert_eq!(envelope.items().len(), 1);
}

#[tokio::test]
async fn test_get_active_filters_on_is_active() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("filters[isActive][$eq]", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert!(service.get_active(None).await.is_ok());
}

#[tokio::test]
async fn test_get_ordered_defaults_to_order_ascending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("sort[0]", "order:asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert!(service.get_ordered(None).await.is_ok());
}

#[tokio::test]
async fn test_count_reads_pagination_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("pagination[pageSize]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [product_json(1, "Sencha", "sencha")],
            "meta": {"pagination": {"page": 1, "pageSize": 1, "pageCount": 57, "total": 57}}
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert_eq!(service.count(None).await.unwrap(), 57);
}

#[tokio::test]
async fn test_count_returns_zero_without_pagination_meta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert_eq!(service.count(None).await.unwrap(), 0);
}

// ============================================================================
// Default locale
// ============================================================================

#[tokio::test]
async fn test_default_locale_appears_in_service_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("locale", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let service = service_for(&server).with_default_locale("en");
    assert!(service.get_all(None).await.is_ok());
}
