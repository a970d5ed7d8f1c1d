//! # botica-api: REST Client Layer for the Botica Admin Dashboard
//!
//! Everything that touches the network lives here; business logic stays in
//! `botica-core`.
//!
//! ## Module Organization
//! ```text
//! botica_api/
//! ├── lib.rs       ◄─── You are here (exports & wiring)
//! ├── session.rs   ◄─── Explicit bearer-token context (init/teardown)
//! ├── client.rs    ◄─── Authenticated JSON client over /api
//! ├── cache.rs     ◄─── Remote entity cache (stale-while-revalidate)
//! ├── payload.rs   ◄─── Request bodies for every mutation
//! ├── dispatch.rs  ◄─── Mutation dispatcher + invalidation table
//! ├── checkout.rs  ◄─── Sale/purchase commit protocols
//! └── error.rs     ◄─── ApiError / CommitError
//! ```
//!
//! ## Data Flow
//! ```text
//! EntityCache ──reads──► Ledger/Composer (botica-core)
//!                              │ submit
//!                              ▼
//!                       checkout::submit_*
//!                              │
//!                              ▼
//!                      MutationDispatcher ──invalidates──► EntityCache
//! ```
//!
//! ## Typical Wiring
//! ```rust,no_run
//! use botica_api::{ApiClient, ApiConfig, EntityCache, MutationDispatcher, Session};
//!
//! let session = Session::load_persisted();
//! let client = ApiClient::new(ApiConfig::from_env(), session);
//! let cache = EntityCache::new(client.clone());
//! let dispatcher = MutationDispatcher::new(client, cache.clone());
//! ```

pub mod cache;
pub mod checkout;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod payload;
pub mod session;

pub use cache::{CacheKey, EntityCache, Snapshot, PAGE_SIZE};
pub use checkout::{submit_purchase, submit_sale};
pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use dispatch::{invalidated_resources, Mutation, MutationDispatcher, MutationKind};
pub use error::{ApiError, ApiResult, CommitError};
pub use payload::{
    CreateCustomerBody, CreateProductBody, CreateProviderBody, CreatePurchaseBody, CreateSaleBody,
    PurchaseItemBody, SaleItemBody, UpdateProductBody, UpdateProviderBody,
};
pub use session::Session;
