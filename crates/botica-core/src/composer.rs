//! # Transaction Composer
//!
//! Explicit state machines for the two-phase sale wizard and the single-phase
//! purchase form.
//!
//! Phases are a tagged enum and every mutation of the phase goes through one
//! transition function per composer ([`SaleComposer::apply`],
//! [`PurchaseComposer::apply`]). Guards reject the transition with a typed
//! error and leave the draft untouched; there is no partially-applied
//! transition.
//!
//! ## Sale phases
//! ```text
//! ComposingItems ──advance──► CapturingCounterparty ──begin_submit──► Submitting
//!       ▲                            ▲    ▲                              │
//!       └────────── back ────────────┘    └───────── commit_failed ──────┤
//!                                                                        │
//!                                              Closed ◄── commit_succeeded
//! ```
//!
//! Purchases skip the counterparty phase: the supplier is chosen, not
//! created, so a failed commit returns straight to `ComposingItems`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ComposerError;
use crate::ledger::Ledger;
use crate::types::{PurchasePaymentType, SalePaymentType};
use crate::validation::validate_customer_draft;

// =============================================================================
// Phase
// =============================================================================

/// Composer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Building the line item ledger.
    ComposingItems,
    /// Capturing new-customer details (sales only).
    CapturingCounterparty,
    /// A commit request is in flight; further submits are rejected.
    Submitting,
    /// Terminal success state; the draft has been reset.
    Closed,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::ComposingItems
    }
}

// =============================================================================
// Counterparty Draft
// =============================================================================

/// The inline-entered new customer captured during a sale's second phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerDraft {
    pub full_name: String,
    /// National identity document number.
    pub ci: String,
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Sale Composer
// =============================================================================

/// Transitions of the sale composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleAction {
    /// ComposingItems → CapturingCounterparty (guarded by ledger validation).
    Advance,
    /// CapturingCounterparty → ComposingItems, always allowed.
    Back,
    /// CapturingCounterparty → Submitting (guarded by counterparty fields).
    BeginSubmit,
    /// Submitting → Closed; resets the draft.
    CommitSucceeded,
    /// Submitting → CapturingCounterparty; draft preserved for retry.
    CommitFailed,
}

/// Draft state for registering a sale: the ledger, the payment type, and the
/// new customer to create alongside the sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleComposer {
    pub ledger: Ledger,
    pub payment_type: SalePaymentType,
    pub customer: CustomerDraft,
    phase: Phase,
}

impl SaleComposer {
    /// Opens a fresh composer in `ComposingItems` with an empty draft.
    pub fn new() -> Self {
        SaleComposer {
            ledger: Ledger::new(),
            payment_type: SalePaymentType::default(),
            customer: CustomerDraft::default(),
            phase: Phase::ComposingItems,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The single transition function. Guards reject with a typed error and
    /// leave both phase and draft untouched.
    pub fn apply(&mut self, action: SaleAction) -> Result<Phase, ComposerError> {
        match (self.phase, action) {
            (Phase::ComposingItems, SaleAction::Advance) => {
                self.ledger.validate()?;
                self.phase = Phase::CapturingCounterparty;
            }
            (Phase::CapturingCounterparty, SaleAction::Back) => {
                self.phase = Phase::ComposingItems;
            }
            (Phase::CapturingCounterparty, SaleAction::BeginSubmit) => {
                let errors = validate_customer_draft(&self.customer);
                if !errors.is_empty() {
                    return Err(ComposerError::InvalidCounterparty(errors));
                }
                self.phase = Phase::Submitting;
            }
            (Phase::Submitting, SaleAction::CommitSucceeded) => {
                self.reset_draft();
                self.phase = Phase::Closed;
            }
            (Phase::Submitting, SaleAction::CommitFailed) => {
                // Draft preserved verbatim so the user can retry
                self.phase = Phase::CapturingCounterparty;
            }
            (Phase::Submitting, SaleAction::BeginSubmit | SaleAction::Advance) => {
                return Err(ComposerError::SubmissionInFlight);
            }
            (phase, action) => {
                return Err(ComposerError::InvalidPhase {
                    phase,
                    action: action_name_sale(action),
                });
            }
        }

        Ok(self.phase)
    }

    pub fn advance(&mut self) -> Result<Phase, ComposerError> {
        self.apply(SaleAction::Advance)
    }

    pub fn back(&mut self) -> Result<Phase, ComposerError> {
        self.apply(SaleAction::Back)
    }

    pub fn begin_submit(&mut self) -> Result<Phase, ComposerError> {
        self.apply(SaleAction::BeginSubmit)
    }

    pub fn commit_succeeded(&mut self) -> Result<Phase, ComposerError> {
        self.apply(SaleAction::CommitSucceeded)
    }

    pub fn commit_failed(&mut self) -> Result<Phase, ComposerError> {
        self.apply(SaleAction::CommitFailed)
    }

    fn reset_draft(&mut self) {
        self.ledger.reset();
        self.customer = CustomerDraft::default();
        self.payment_type = SalePaymentType::default();
    }
}

fn action_name_sale(action: SaleAction) -> &'static str {
    match action {
        SaleAction::Advance => "advance",
        SaleAction::Back => "go back",
        SaleAction::BeginSubmit => "begin submit",
        SaleAction::CommitSucceeded => "record commit success",
        SaleAction::CommitFailed => "record commit failure",
    }
}

// =============================================================================
// Purchase Composer
// =============================================================================

/// Transitions of the purchase composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseAction {
    /// ComposingItems → Submitting (guarded by provider + ledger validation).
    BeginSubmit,
    /// Submitting → Closed; resets the draft.
    CommitSucceeded,
    /// Submitting → ComposingItems; draft preserved for retry.
    CommitFailed,
}

/// Draft state for registering a purchase against an existing supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseComposer {
    pub ledger: Ledger,
    /// The selected supplier. Suppliers pre-exist; none is created here.
    pub provider_id: Option<u64>,
    pub payment_type: PurchasePaymentType,
    phase: Phase,
}

impl PurchaseComposer {
    pub fn new() -> Self {
        PurchaseComposer {
            ledger: Ledger::new(),
            provider_id: None,
            payment_type: PurchasePaymentType::default(),
            phase: Phase::ComposingItems,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The single transition function for purchases.
    pub fn apply(&mut self, action: PurchaseAction) -> Result<Phase, ComposerError> {
        match (self.phase, action) {
            (Phase::ComposingItems, PurchaseAction::BeginSubmit) => {
                if self.provider_id.is_none() {
                    return Err(ComposerError::ProviderNotSelected);
                }
                self.ledger.validate()?;
                self.phase = Phase::Submitting;
            }
            (Phase::Submitting, PurchaseAction::CommitSucceeded) => {
                self.reset_draft();
                self.phase = Phase::Closed;
            }
            (Phase::Submitting, PurchaseAction::CommitFailed) => {
                self.phase = Phase::ComposingItems;
            }
            (Phase::Submitting, PurchaseAction::BeginSubmit) => {
                return Err(ComposerError::SubmissionInFlight);
            }
            (phase, action) => {
                return Err(ComposerError::InvalidPhase {
                    phase,
                    action: action_name_purchase(action),
                });
            }
        }

        Ok(self.phase)
    }

    pub fn begin_submit(&mut self) -> Result<Phase, ComposerError> {
        self.apply(PurchaseAction::BeginSubmit)
    }

    pub fn commit_succeeded(&mut self) -> Result<Phase, ComposerError> {
        self.apply(PurchaseAction::CommitSucceeded)
    }

    pub fn commit_failed(&mut self) -> Result<Phase, ComposerError> {
        self.apply(PurchaseAction::CommitFailed)
    }

    fn reset_draft(&mut self) {
        self.ledger.reset();
        self.provider_id = None;
        self.payment_type = PurchasePaymentType::default();
    }
}

fn action_name_purchase(action: PurchaseAction) -> &'static str {
    match action {
        PurchaseAction::BeginSubmit => "begin submit",
        PurchaseAction::CommitSucceeded => "record commit success",
        PurchaseAction::CommitFailed => "record commit failure",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
