//! # API Error Types
//!
//! Remote-call failures are caught at the client/dispatcher boundary and
//! converted into these types; they never propagate as panics or unhandled
//! rejections. Commit errors additionally carry enough context to surface
//! the non-atomic sale protocol's partial-failure case.

use thiserror::Error;

use botica_core::ComposerError;

/// Result type for remote operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Api Error
// =============================================================================

/// A failed remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (connection refused, timeout, malformed body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any response with status >= 401.
    ///
    /// The backend contract treats the whole range inclusively as an auth
    /// failure notification. The stored token is NOT cleared here.
    #[error("auth failure (status {status}): {message}")]
    AuthFailed { status: u16, message: String },

    /// A non-auth rejection (status 400).
    #[error("request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response `.data` did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// A cache fetch shared with another caller failed; the stored error
    /// message is all that remains of the original failure.
    #[error("fetch for {key} failed: {message}")]
    FetchFailed { key: String, message: String },

    /// A cache key that maps to no known backend collection.
    #[error("unknown cache resource: {key}")]
    UnknownResource { key: String },
}

// =============================================================================
// Commit Error
// =============================================================================

/// A failed transaction submission.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The composer rejected the submission before any network call.
    #[error("draft rejected: {0}")]
    Draft(#[from] ComposerError),

    /// Step 1 of the sale protocol failed; the sale call was never issued.
    #[error("customer creation failed: {0}")]
    CustomerCreation(#[source] ApiError),

    /// Step 2 of the sale protocol failed after step 1 succeeded. There is
    /// no compensating delete: the customer record persists without an
    /// associated sale and its id is surfaced here.
    #[error("sale creation failed; customer {orphaned_customer_id} was created without a sale: {source}")]
    SaleCreation {
        #[source]
        source: ApiError,
        orphaned_customer_id: u64,
    },

    /// The single-call purchase commit failed.
    #[error("purchase creation failed: {0}")]
    Purchase(#[source] ApiError),
}

// =============================================================================
// Unit Tests
// =============================================================================
