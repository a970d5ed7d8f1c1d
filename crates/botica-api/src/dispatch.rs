//! # Mutation Dispatcher
//!
//! Executes a single create/update/delete against the backend, reports the
//! outcome, and invalidates the dependent cache resources exactly once per
//! successful mutation.
//!
//! Invalidation rules live in one declarative table
//! ([`invalidated_resources`]) instead of being scattered across call sites,
//! so they are centralized and testable. Mutations are fire-once: a failure
//! performs no invalidation and is returned to the caller — retries are a
//! caller decision.

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use botica_core::{Customer, Product, Provider, Purchase, Sale};

use crate::cache::{
    EntityCache, CLIENTS_PAGINATE, PRODUCTS, PRODUCTS_PAGINATE, SUPPLIERS, SUPPLIERS_PAGINATE,
};
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::payload::{
    CreateCustomerBody, CreateProductBody, CreateProviderBody, CreatePurchaseBody, CreateSaleBody,
    UpdateProductBody, UpdateProviderBody,
};

// =============================================================================
// Mutations
// =============================================================================

/// Discriminant of a mutation; the invalidation table is keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreateCustomer,
    CreateSale,
    CreatePurchase,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    CreateProvider,
    UpdateProvider,
    DeleteProvider,
}

/// A single remote write, carrying its request body.
#[derive(Debug, Clone)]
pub enum Mutation {
    CreateCustomer(CreateCustomerBody),
    CreateSale(CreateSaleBody),
    CreatePurchase(CreatePurchaseBody),
    CreateProduct(CreateProductBody),
    UpdateProduct(UpdateProductBody),
    DeleteProduct { id: u64 },
    CreateProvider(CreateProviderBody),
    UpdateProvider(UpdateProviderBody),
    DeleteProvider { id: u64 },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::CreateCustomer(_) => MutationKind::CreateCustomer,
            Mutation::CreateSale(_) => MutationKind::CreateSale,
            Mutation::CreatePurchase(_) => MutationKind::CreatePurchase,
            Mutation::CreateProduct(_) => MutationKind::CreateProduct,
            Mutation::UpdateProduct(_) => MutationKind::UpdateProduct,
            Mutation::DeleteProduct { .. } => MutationKind::DeleteProduct,
            Mutation::CreateProvider(_) => MutationKind::CreateProvider,
            Mutation::UpdateProvider(_) => MutationKind::UpdateProvider,
            Mutation::DeleteProvider { .. } => MutationKind::DeleteProvider,
        }
    }

    /// Method, path, and JSON body for this mutation.
    fn request(&self) -> ApiResult<(Method, String, Option<Value>)> {
        let parts = match self {
            Mutation::CreateCustomer(body) => (
                Method::POST,
                "/customers".to_string(),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::CreateSale(body) => (
                Method::POST,
                "/sale-products".to_string(),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::CreatePurchase(body) => (
                Method::POST,
                "/purchase-products".to_string(),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::CreateProduct(body) => (
                Method::POST,
                "/products".to_string(),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::UpdateProduct(body) => (
                Method::PUT,
                format!("/products/{}", body.id),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::DeleteProduct { id } => {
                (Method::DELETE, format!("/products/{}", id), None)
            }
            Mutation::CreateProvider(body) => (
                Method::POST,
                "/providers".to_string(),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::UpdateProvider(body) => (
                Method::PUT,
                format!("/providers/{}", body.id),
                Some(serde_json::to_value(body)?),
            ),
            Mutation::DeleteProvider { id } => {
                (Method::DELETE, format!("/providers/{}", id), None)
            }
        };

        Ok(parts)
    }
}

// =============================================================================
// Invalidation Table
// =============================================================================

/// Mutation type → cache resources invalidated on success.
///
/// Sales and purchases move stock server-side, so they invalidate the
/// product caches that list views depend on.
const INVALIDATION_TABLE: &[(MutationKind, &[&str])] = &[
    (MutationKind::CreateCustomer, &[CLIENTS_PAGINATE]),
    (MutationKind::CreateSale, &[PRODUCTS, PRODUCTS_PAGINATE]),
    (MutationKind::CreatePurchase, &[PRODUCTS, PRODUCTS_PAGINATE]),
    (MutationKind::CreateProduct, &[PRODUCTS, PRODUCTS_PAGINATE]),
    (MutationKind::UpdateProduct, &[PRODUCTS, PRODUCTS_PAGINATE]),
    (MutationKind::DeleteProduct, &[PRODUCTS, PRODUCTS_PAGINATE]),
    (MutationKind::CreateProvider, &[SUPPLIERS, SUPPLIERS_PAGINATE]),
    (MutationKind::UpdateProvider, &[SUPPLIERS, SUPPLIERS_PAGINATE]),
    (MutationKind::DeleteProvider, &[SUPPLIERS, SUPPLIERS_PAGINATE]),
];

/// The cache resources a successful mutation of `kind` invalidates.
pub fn invalidated_resources(kind: MutationKind) -> &'static [&'static str] {
    INVALIDATION_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, resources)| *resources)
        .unwrap_or(&[])
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Executes mutations and keeps the entity cache coherent.
#[derive(Debug, Clone)]
pub struct MutationDispatcher {
    client: ApiClient,
    cache: EntityCache,
}

impl MutationDispatcher {
    pub fn new(client: ApiClient, cache: EntityCache) -> Self {
        MutationDispatcher { client, cache }
    }

    /// Executes one mutation. On success the declared resources are
    /// invalidated exactly once; on failure nothing is touched and the error
    /// is returned for the caller to present.
    pub async fn dispatch(&self, mutation: Mutation) -> ApiResult<Value> {
        let kind = mutation.kind();
        let (method, path, body) = mutation.request()?;
        debug!(?kind, %path, "dispatching mutation");

        match self.client.request(method, &path, body).await {
            Ok(value) => {
                for resource in invalidated_resources(kind) {
                    self.cache.invalidate(resource).await;
                }
                info!(?kind, "mutation committed");
                Ok(value)
            }
            Err(err) => {
                warn!(?kind, error = %err, "mutation failed; caches untouched");
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Typed helpers
    // -------------------------------------------------------------------------

    pub async fn create_customer(&self, body: CreateCustomerBody) -> ApiResult<Customer> {
        let value = self.dispatch(Mutation::CreateCustomer(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create_sale(&self, body: CreateSaleBody) -> ApiResult<Sale> {
        let value = self.dispatch(Mutation::CreateSale(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create_purchase(&self, body: CreatePurchaseBody) -> ApiResult<Purchase> {
        let value = self.dispatch(Mutation::CreatePurchase(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create_product(&self, body: CreateProductBody) -> ApiResult<Product> {
        let value = self.dispatch(Mutation::CreateProduct(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_product(&self, body: UpdateProductBody) -> ApiResult<Product> {
        let value = self.dispatch(Mutation::UpdateProduct(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete_product(&self, id: u64) -> ApiResult<()> {
        self.dispatch(Mutation::DeleteProduct { id }).await?;
        Ok(())
    }

    pub async fn create_provider(&self, body: CreateProviderBody) -> ApiResult<Provider> {
        let value = self.dispatch(Mutation::CreateProvider(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_provider(&self, body: UpdateProviderBody) -> ApiResult<Provider> {
        let value = self.dispatch(Mutation::UpdateProvider(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete_provider(&self, id: u64) -> ApiResult<()> {
        self.dispatch(Mutation::DeleteProvider { id }).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
