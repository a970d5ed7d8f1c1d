//! # Checkout
//!
//! The commit protocols that turn a composed draft into committed remote
//! state, driving the composer state machines through `Submitting`.
//!
//! ## Sale protocol (two dependent calls, client-orchestrated)
//! ```text
//! begin_submit ──► POST /customers ──► POST /sale-products ──► Closed
//!                      │ failure             │ failure
//!                      ▼                     ▼
//!            CapturingCounterparty   CapturingCounterparty
//!            (sale never attempted)  (customer persists as an orphan;
//!                                     its id is surfaced in the error)
//! ```
//!
//! The protocol is NOT atomic and there is no compensating delete when the
//! second step fails — the orphaned-customer case is surfaced explicitly via
//! [`CommitError::SaleCreation`] rather than hidden.
//!
//! Purchases commit with a single call; a failure returns the composer to
//! `ComposingItems` with the draft intact.

use tracing::{error, info, warn};
use uuid::Uuid;

use botica_core::{
    ComposerError, PurchaseAction, PurchaseComposer, SaleAction, SaleComposer,
    Purchase, Sale,
};

use crate::dispatch::MutationDispatcher;
use crate::error::CommitError;
use crate::payload::{CreateCustomerBody, CreatePurchaseBody, CreateSaleBody};

/// Commits a sale: creates the customer, then the sale referencing it.
///
/// The composer must be in `CapturingCounterparty` with a valid draft; on
/// success it ends `Closed` with the draft reset, on failure it returns to
/// `CapturingCounterparty` with the draft preserved for retry.
pub async fn submit_sale(
    composer: &mut SaleComposer,
    dispatcher: &MutationDispatcher,
) -> Result<Sale, CommitError> {
    composer.begin_submit()?;

    let attempt_id = Uuid::new_v4();
    info!(
        %attempt_id,
        lines = composer.ledger.len(),
        total = %composer.ledger.total(),
        "submitting sale"
    );

    let customer_body = CreateCustomerBody::from_draft(&composer.customer);
    let customer = match dispatcher.create_customer(customer_body).await {
        Ok(customer) => customer,
        Err(err) => {
            warn!(%attempt_id, error = %err, "customer creation failed; sale not attempted");
            record_sale_outcome(composer, SaleAction::CommitFailed);
            return Err(CommitError::CustomerCreation(err));
        }
    };

    let sale_body = CreateSaleBody::from_ledger(composer.payment_type, customer.id, &composer.ledger);
    match dispatcher.create_sale(sale_body).await {
        Ok(sale) => {
            record_sale_outcome(composer, SaleAction::CommitSucceeded);
            info!(%attempt_id, sale_id = sale.id, customer_id = customer.id, "sale committed");
            Ok(sale)
        }
        Err(err) => {
            // No compensation exists: the customer now persists without a sale
            warn!(
                %attempt_id,
                orphaned_customer_id = customer.id,
                error = %err,
                "sale creation failed after customer was created"
            );
            record_sale_outcome(composer, SaleAction::CommitFailed);
            Err(CommitError::SaleCreation {
                source: err,
                orphaned_customer_id: customer.id,
            })
        }
    }
}

/// Commits a purchase with a single call against the selected supplier.
pub async fn submit_purchase(
    composer: &mut PurchaseComposer,
    dispatcher: &MutationDispatcher,
) -> Result<Purchase, CommitError> {
    let provider_id = composer
        .provider_id
        .ok_or(ComposerError::ProviderNotSelected)?;
    composer.begin_submit()?;

    let attempt_id = Uuid::new_v4();
    info!(
        %attempt_id,
        provider_id,
        lines = composer.ledger.len(),
        total = %composer.ledger.total(),
        "submitting purchase"
    );

    let body = CreatePurchaseBody::from_ledger(provider_id, composer.payment_type, &composer.ledger);
    match dispatcher.create_purchase(body).await {
        Ok(purchase) => {
            record_purchase_outcome(composer, PurchaseAction::CommitSucceeded);
            info!(%attempt_id, purchase_id = purchase.id, "purchase committed");
            Ok(purchase)
        }
        Err(err) => {
            warn!(%attempt_id, error = %err, "purchase creation failed");
            record_purchase_outcome(composer, PurchaseAction::CommitFailed);
            Err(CommitError::Purchase(err))
        }
    }
}

/// Feeds a commit outcome into the sale machine. The composer is in
/// `Submitting` at every call site, so a rejection here is a logic bug worth
/// a loud log rather than a panic.
fn record_sale_outcome(composer: &mut SaleComposer, action: SaleAction) {
    if let Err(err) = composer.apply(action) {
        error!(?err, "sale composer rejected commit outcome");
    }
}

fn record_purchase_outcome(composer: &mut PurchaseComposer, action: PurchaseAction) {
    if let Err(err) = composer.apply(action) {
        error!(?err, "purchase composer rejected commit outcome");
    }
}
