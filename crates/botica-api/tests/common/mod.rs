//! Shared wiring for the wiremock-backed integration tests.

#![allow(dead_code)]

use botica_api::{ApiClient, ApiConfig, EntityCache, MutationDispatcher, Session};
use serde_json::{json, Value};
use wiremock::MockServer;

/// A mock backend plus the full client stack wired against it.
pub struct TestBackend {
    pub server: MockServer,
    pub client: ApiClient,
    pub cache: EntityCache,
    pub dispatcher: MutationDispatcher,
}

pub async fn start() -> TestBackend {
    start_with_session(Session::new()).await
}

pub async fn start_with_session(session: Session) -> TestBackend {
    init_tracing();
    let server = MockServer::start().await;
    let client = ApiClient::new(ApiConfig::new(server.uri()), session);
    let cache = EntityCache::new(client.clone());
    let dispatcher = MutationDispatcher::new(client.clone(), cache.clone());
    TestBackend {
        server,
        client,
        cache,
        dispatcher,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wraps a payload in the backend's `{ "data": ... }` envelope.
pub fn envelope(data: Value) -> Value {
    json!({ "data": data })
}

pub fn product_json(id: u64, name: &str, price: f64, stock: i64) -> Value {
    json!({
        "id": id,
        "code": format!("SKU-{}", id),
        "name": name,
        "category_id": 1,
        "presentation_id": 1,
        "unit": "caja",
        "price": price,
        "descuento": 0.0,
        "stock": stock,
        "stock_min": 5,
        "created_at": "2023-11-01T10:00:00Z"
    })
}

pub fn customer_json(id: u64) -> Value {
    json!({
        "id": id,
        "full_name": "Ana Ruiz",
        "ci": "12345",
        "address": "Calle 1",
        "phone": "70000000"
    })
}

pub fn sale_json(id: u64, client_id: u64, total: f64) -> Value {
    json!({
        "id": id,
        "client_id": client_id,
        "user_id": 1,
        "total": total,
        "payment_type": "efectivo",
        "status": "completada",
        "created_at": "2024-05-01T12:00:00Z"
    })
}

pub fn purchase_json(id: u64, provider_id: u64, total: f64) -> Value {
    json!({
        "id": id,
        "provider_id": provider_id,
        "user_id": 1,
        "total": total,
        "payment_type": "tarjeta",
        "status": "pendiente",
        "created_at": "2024-05-01T12:00:00Z"
    })
}
