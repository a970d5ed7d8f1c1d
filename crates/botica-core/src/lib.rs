//! # botica-core: Pure Business Logic for the Botica Admin Dashboard
//!
//! This crate contains all client-side business logic for composing pharmacy
//! transactions as pure functions and state machines with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Dashboard UI (rendering)                     │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │              ★ botica-core (THIS CRATE) ★                       │
//! │                                                                 │
//! │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐        │
//! │   │  types   │ │  money   │ │  ledger  │ │  composer  │        │
//! │   │ Product  │ │  Money   │ │  Ledger  │ │ Sale/Purch │        │
//! │   │ Customer │ │  cents   │ │ LineItem │ │  machines  │        │
//! │   └──────────┘ └──────────┘ └──────────┘ └────────────┘        │
//! │                                                                 │
//! │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │         botica-api (REST client, cache, mutations)              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire-faithful domain types (Product, Customer, Page, ...)
//! - [`money`] - Integer-cent money with decimal wire serialization
//! - [`ledger`] - The line item ledger and its derived totals
//! - [`composer`] - Sale/purchase composer state machines
//! - [`validation`] - Per-field and per-line draft validation
//! - [`error`] - Typed domain errors
//!
//! ## Design Principles
//!
//! 1. Every function is deterministic - same input, same output
//! 2. No I/O - remote data arrives as arguments, never fetched here
//! 3. Integer money - all monetary math runs on i64 cents
//! 4. Explicit errors - typed enums, never strings or panics

pub mod composer;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

pub use composer::{
    CustomerDraft, Phase, PurchaseAction, PurchaseComposer, SaleAction, SaleComposer,
};
pub use error::{ComposerError, LineError, ValidationError};
pub use ledger::{Ledger, LineItem};
pub use money::Money;
pub use types::*;
