//! Mutation dispatcher: fire-once execution and table-driven invalidation.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use botica_api::cache::{CacheKey, PRODUCTS, PRODUCTS_PAGINATE};
use botica_api::{ApiError, CreateCustomerBody, CreateProductBody, CreateProviderBody};
use botica_core::Money;

fn product_body() -> CreateProductBody {
    CreateProductBody {
        code: "AMOX-250".to_string(),
        name: "Amoxicilina 250mg/5ml".to_string(),
        category_id: 2,
        presentation_id: 3,
        unit: "frasco".to_string(),
        price: Money::from_cents(1000),
        discount_pct: 0.0,
        stock: 20,
        stock_min: 5,
        description: None,
    }
}

async fn mount_product_reads(backend: &common::TestBackend) {
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!([
            common::product_json(1, "Paracetamol 500mg", 5.5, 100)
        ]))))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/paginate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({
            "data": [common::product_json(1, "Paracetamol 500mg", 5.5, 100)],
            "pagination": {
                "current_page": 1,
                "total_pages": 1,
                "total_items": 1,
                "page_size": 10,
                "has_next": false,
                "has_previous": false
            }
        }))))
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn successful_mutation_invalidates_declared_resources() {
    let backend = common::start().await;
    mount_product_reads(&backend).await;

    backend.cache.products().await.unwrap();
    backend.cache.products_page(1).await.unwrap();
    assert!(!backend.cache.read(&CacheKey::plain(PRODUCTS)).await.is_stale);

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(
            common::product_json(99, "Amoxicilina 250mg/5ml", 10.0, 20),
        )))
        .expect(1)
        .mount(&backend.server)
        .await;

    let created = backend.dispatcher.create_product(product_body()).await.unwrap();
    assert_eq!(created.id, 99);

    // Every page of both product views is marked for refetch
    assert!(backend.cache.read(&CacheKey::plain(PRODUCTS)).await.is_stale);
    assert!(
        backend
            .cache
            .read(&CacheKey::paged(PRODUCTS_PAGINATE, 1))
            .await
            .is_stale
    );
}

#[tokio::test]
async fn failed_mutation_invalidates_nothing() {
    let backend = common::start().await;
    mount_product_reads(&backend).await;

    backend.cache.products().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "duplicate code" })),
        )
        .mount(&backend.server)
        .await;

    match backend.dispatcher.create_product(product_body()).await {
        Err(ApiError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "duplicate code");
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    assert!(!backend.cache.read(&CacheKey::plain(PRODUCTS)).await.is_stale);
}

#[tokio::test]
async fn create_customer_posts_expected_body() {
    let backend = common::start().await;

    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .and(body_json(json!({
            "full_name": "Ana Ruiz",
            "ci": "12345",
            "address": "Calle 1",
            "phone": "70000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(
            common::customer_json(42),
        )))
        .expect(1)
        .mount(&backend.server)
        .await;

    let customer = backend
        .dispatcher
        .create_customer(CreateCustomerBody {
            full_name: "Ana Ruiz".to_string(),
            ci: "12345".to_string(),
            address: "Calle 1".to_string(),
            phone: "70000000".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(customer.id, 42);
    assert_eq!(customer.full_name, "Ana Ruiz");
}

#[tokio::test]
async fn provider_crud_uses_rest_paths() {
    let backend = common::start().await;

    Mock::given(method("POST"))
        .and(path("/api/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({
            "id": 4,
            "name": "Distribuidora Central",
            "nit": "900123",
            "phone": "555-1234",
            "address": "Av. Principal 100"
        }))))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/providers/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!(null))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let provider = backend
        .dispatcher
        .create_provider(CreateProviderBody {
            name: "Distribuidora Central".to_string(),
            nit: "900123".to_string(),
            phone: "555-1234".to_string(),
            address: "Av. Principal 100".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(provider.id, 4);

    backend.dispatcher.delete_provider(4).await.unwrap();
}
