//! # Remote Entity Cache
//!
//! Keyed, revalidating read cache over the backend's paginated and
//! unpaginated collections. Shared process-wide; every list view and both
//! composers read through it.
//!
//! ## Contract
//! - [`EntityCache::read`] never fetches: it returns the last-known data
//!   (None before the first fetch) plus loading/staleness/error flags.
//! - [`EntityCache::fetch`] returns fresh data, refetching when the entry is
//!   missing, stale, or errored. Concurrent fetches of one key share a
//!   single in-flight request.
//! - A failed fetch leaves prior data in place and marks the entry errored;
//!   callers distinguish "empty because no data" from "empty because the
//!   fetch failed" via the error flag.
//! - [`EntityCache::invalidate`] marks every page of a resource stale; data
//!   is kept for stale serving until the next fetch replaces it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use botica_core::{Category, Customer, Page, Presentation, Product, Provider};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Resources
// =============================================================================

/// Pagination page size; the backend contract fixes this at 10.
pub const PAGE_SIZE: u32 = 10;

pub const PRODUCTS: &str = "products";
pub const PRODUCTS_PAGINATE: &str = "products-paginate";
pub const SUPPLIERS: &str = "suppliers";
pub const SUPPLIERS_PAGINATE: &str = "suppliers-paginate";
pub const CLIENTS_PAGINATE: &str = "clients-paginate";
pub const CATEGORIES: &str = "categories";
pub const PRESENTATIONS: &str = "presentations";

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key: resource name plus page number for paginated collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    resource: &'static str,
    page: Option<u32>,
}

impl CacheKey {
    /// Key for an unpaginated collection.
    pub const fn plain(resource: &'static str) -> Self {
        CacheKey {
            resource,
            page: None,
        }
    }

    /// Key for one page of a paginated collection.
    pub const fn paged(resource: &'static str, page: u32) -> Self {
        CacheKey {
            resource,
            page: Some(page),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{}:{}", self.resource, page),
            None => f.write_str(self.resource),
        }
    }
}

/// Maps a key to its backend request path. Paginated resources always send
/// `page` and `page_size`.
fn request_path(key: &CacheKey) -> ApiResult<String> {
    let path = match (key.resource, key.page) {
        (PRODUCTS, None) => "/products".to_string(),
        (PRODUCTS_PAGINATE, Some(page)) => {
            format!("/products/paginate?page={}&page_size={}", page, PAGE_SIZE)
        }
        (SUPPLIERS, None) => "/providers".to_string(),
        (SUPPLIERS_PAGINATE, Some(page)) => {
            format!("/providers?page={}&page_size={}", page, PAGE_SIZE)
        }
        (CLIENTS_PAGINATE, Some(page)) => {
            format!("/customers?page={}&page_size={}", page, PAGE_SIZE)
        }
        (CATEGORIES, None) => "/categories".to_string(),
        (PRESENTATIONS, None) => "/presentations".to_string(),
        _ => {
            return Err(ApiError::UnknownResource {
                key: key.to_string(),
            })
        }
    };

    Ok(path)
}

// =============================================================================
// Entries
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Freshness {
    /// Never fetched successfully.
    #[default]
    Missing,
    Fresh,
    /// Invalidated or superseded; data retained for stale serving.
    Stale,
}

#[derive(Debug, Default)]
struct Entry {
    data: Option<Value>,
    freshness: Freshness,
    error: Option<String>,
    /// Present while a fetch for this key is in flight; followers wait on it.
    inflight: Option<watch::Receiver<bool>>,
}

/// Non-blocking view of one cache entry.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Last-known data; None before the first successful fetch.
    pub data: Option<Value>,
    /// A fetch for this key is currently in flight.
    pub is_loading: bool,
    /// The entry was invalidated and awaits revalidation.
    pub is_stale: bool,
    /// Message of the most recent failed fetch, cleared on success.
    pub error: Option<String>,
}

enum FetchRole {
    Leader(watch::Sender<bool>),
    Follower(watch::Receiver<bool>),
}

// =============================================================================
// Entity Cache
// =============================================================================

/// The shared read cache. Cheap to clone; all clones share one entry map.
#[derive(Debug, Clone)]
pub struct EntityCache {
    client: ApiClient,
    entries: Arc<RwLock<HashMap<CacheKey, Entry>>>,
}

impl EntityCache {
    pub fn new(client: ApiClient) -> Self {
        EntityCache {
            client,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the entry's last-known state without fetching.
    pub async fn read(&self, key: &CacheKey) -> Snapshot {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => Snapshot {
                data: entry.data.clone(),
                is_loading: entry.inflight.is_some(),
                is_stale: entry.freshness != Freshness::Fresh,
                error: entry.error.clone(),
            },
            None => Snapshot {
                data: None,
                is_loading: false,
                is_stale: true,
                error: None,
            },
        }
    }

    /// Marks every entry of `resource` (all pages) for background refetch on
    /// next access. Data is retained and served stale until then.
    pub async fn invalidate(&self, resource: &str) {
        let mut entries = self.entries.write().await;
        let mut marked = 0usize;
        for (key, entry) in entries.iter_mut() {
            if key.resource == resource && entry.freshness == Freshness::Fresh {
                entry.freshness = Freshness::Stale;
                marked += 1;
            }
        }
        debug!(resource, marked, "cache invalidated");
    }

    /// Fetches the entry's current value, reusing a fresh cached value or an
    /// in-flight request when one exists.
    pub async fn fetch_value(&self, key: &CacheKey) -> ApiResult<Value> {
        let path = request_path(key)?;

        loop {
            // Fast path: fresh cached value
            {
                let entries = self.entries.read().await;
                if let Some(entry) = entries.get(key) {
                    if entry.freshness == Freshness::Fresh {
                        if let Some(data) = &entry.data {
                            return Ok(data.clone());
                        }
                    }
                }
            }

            // Join the in-flight fetch or become its leader
            let role = {
                let mut entries = self.entries.write().await;
                let entry = entries.entry(key.clone()).or_default();
                if entry.freshness == Freshness::Fresh {
                    if let Some(data) = &entry.data {
                        return Ok(data.clone());
                    }
                }
                match &entry.inflight {
                    Some(rx) => FetchRole::Follower(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(false);
                        entry.inflight = Some(rx);
                        FetchRole::Leader(tx)
                    }
                }
            };

            match role {
                FetchRole::Leader(tx) => {
                    return self.lead_fetch(key, &path, tx).await;
                }
                FetchRole::Follower(mut rx) => {
                    if rx.changed().await.is_err() {
                        // Leader dropped mid-flight; clear the dead marker and retry
                        let mut entries = self.entries.write().await;
                        if let Some(entry) = entries.get_mut(key) {
                            let leader_gone = entry
                                .inflight
                                .as_ref()
                                .map_or(false, |rx| rx.has_changed().is_err());
                            if leader_gone {
                                entry.inflight = None;
                            }
                        }
                        continue;
                    }

                    let entries = self.entries.read().await;
                    let Some(entry) = entries.get(key) else {
                        continue;
                    };
                    if let Some(message) = &entry.error {
                        return Err(ApiError::FetchFailed {
                            key: key.to_string(),
                            message: message.clone(),
                        });
                    }
                    if let Some(data) = &entry.data {
                        return Ok(data.clone());
                    }
                }
            }
        }
    }

    /// Performs the network fetch as the single in-flight leader for `key`.
    async fn lead_fetch(
        &self,
        key: &CacheKey,
        path: &str,
        tx: watch::Sender<bool>,
    ) -> ApiResult<Value> {
        debug!(key = %key, path, "fetching");
        let result = self.client.get_json(path).await;

        let outcome = {
            let mut entries = self.entries.write().await;
            let entry = entries.entry(key.clone()).or_default();
            entry.inflight = None;

            match result {
                Ok(value) => {
                    entry.data = Some(value.clone());
                    entry.freshness = Freshness::Fresh;
                    entry.error = None;
                    Ok(value)
                }
                Err(err) => {
                    // Prior data stays in place for stale serving
                    if entry.freshness == Freshness::Fresh {
                        entry.freshness = Freshness::Stale;
                    }
                    entry.error = Some(err.to_string());
                    warn!(key = %key, error = %err, "fetch failed; serving prior data");
                    Err(err)
                }
            }
        };

        // Wake followers after the entry is settled
        let _ = tx.send(true);
        outcome
    }

    /// Typed fetch: [`Self::fetch_value`] plus deserialization of `.data`.
    pub async fn fetch<T: DeserializeOwned>(&self, key: &CacheKey) -> ApiResult<T> {
        let value = self.fetch_value(key).await?;
        Ok(serde_json::from_value(value)?)
    }

    // -------------------------------------------------------------------------
    // Typed per-resource accessors
    // -------------------------------------------------------------------------

    /// The full product catalog (pickers, price auto-population).
    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.fetch(&CacheKey::plain(PRODUCTS)).await
    }

    /// One page of the product list view.
    pub async fn products_page(&self, page: u32) -> ApiResult<Page<Product>> {
        self.fetch(&CacheKey::paged(PRODUCTS_PAGINATE, page)).await
    }

    /// All suppliers (purchase composer's provider picker).
    pub async fn suppliers(&self) -> ApiResult<Vec<Provider>> {
        self.fetch(&CacheKey::plain(SUPPLIERS)).await
    }

    pub async fn suppliers_page(&self, page: u32) -> ApiResult<Page<Provider>> {
        self.fetch(&CacheKey::paged(SUPPLIERS_PAGINATE, page)).await
    }

    pub async fn customers_page(&self, page: u32) -> ApiResult<Page<Customer>> {
        self.fetch(&CacheKey::paged(CLIENTS_PAGINATE, page)).await
    }

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.fetch(&CacheKey::plain(CATEGORIES)).await
    }

    pub async fn presentations(&self) -> ApiResult<Vec<Presentation>> {
        self.fetch(&CacheKey::plain(PRESENTATIONS)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(CacheKey::plain(PRODUCTS).to_string(), "products");
        assert_eq!(
            CacheKey::paged(PRODUCTS_PAGINATE, 2).to_string(),
            "products-paginate:2"
        );
    }

    #[test]
    fn test_request_paths() {
        assert_eq!(
            request_path(&CacheKey::plain(PRODUCTS)).unwrap(),
            "/products"
        );
        assert_eq!(
            request_path(&CacheKey::paged(PRODUCTS_PAGINATE, 3)).unwrap(),
            "/products/paginate?page=3&page_size=10"
        );
        assert_eq!(
            request_path(&CacheKey::paged(SUPPLIERS_PAGINATE, 1)).unwrap(),
            "/providers?page=1&page_size=10"
        );
        assert_eq!(
            request_path(&CacheKey::paged(CLIENTS_PAGINATE, 2)).unwrap(),
            "/customers?page=2&page_size=10"
        );
    }

    #[test]
    fn test_unknown_resource_rejected() {
        // A paginated resource without a page number has no path
        let err = request_path(&CacheKey::plain(PRODUCTS_PAGINATE)).unwrap_err();
        assert!(matches!(err, ApiError::UnknownResource { .. }));
    }
}
