//! # Wire Payloads
//!
//! Request bodies for every mutation the dashboard issues. Create and edit
//! are distinct types — there are no conditional "required when creating"
//! rules; the caller picks the shape.
//!
//! Sale items deliberately carry no unit price: the backend prices sale
//! lines from the catalog at commit time. Purchase items carry the
//! negotiated unit price plus batch tracking fields, with the expiration
//! date normalized to `YYYY-MM-DD` (empty string when not set).

use serde::{Deserialize, Serialize};

use botica_core::{
    CustomerDraft, Ledger, Money, PurchasePaymentType, SalePaymentType,
};

/// Calendar-date wire format for batch expirations.
const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Counterparty / Sale
// =============================================================================

/// POST `/customers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerBody {
    pub full_name: String,
    pub ci: String,
    pub address: String,
    pub phone: String,
}

impl CreateCustomerBody {
    pub fn from_draft(draft: &CustomerDraft) -> Self {
        CreateCustomerBody {
            full_name: draft.full_name.clone(),
            ci: draft.ci.clone(),
            address: draft.address.clone(),
            phone: draft.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemBody {
    pub product_id: u64,
    pub quantity: i64,
}

/// POST `/sale-products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSaleBody {
    pub payment_type: SalePaymentType,
    pub customer_id: u64,
    pub items: Vec<SaleItemBody>,
}

impl CreateSaleBody {
    /// Assembles the sale payload from a validated ledger. Lines without a
    /// product reference are skipped; the composer's phase guard guarantees
    /// there are none by submit time.
    pub fn from_ledger(payment_type: SalePaymentType, customer_id: u64, ledger: &Ledger) -> Self {
        CreateSaleBody {
            payment_type,
            customer_id,
            items: ledger
                .lines()
                .iter()
                .filter_map(|line| {
                    line.product_id.map(|product_id| SaleItemBody {
                        product_id,
                        quantity: line.quantity,
                    })
                })
                .collect(),
        }
    }
}

// =============================================================================
// Purchase
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseItemBody {
    pub product_id: u64,
    pub quantity: i64,
    pub unit_price: Money,
    /// `YYYY-MM-DD`, or empty when the batch has no expiration recorded.
    pub expiration_date: String,
    pub batch_code: String,
}

/// POST `/purchase-products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePurchaseBody {
    pub provider_id: u64,
    pub payment_type: PurchasePaymentType,
    pub items: Vec<PurchaseItemBody>,
}

impl CreatePurchaseBody {
    pub fn from_ledger(
        provider_id: u64,
        payment_type: PurchasePaymentType,
        ledger: &Ledger,
    ) -> Self {
        CreatePurchaseBody {
            provider_id,
            payment_type,
            items: ledger
                .lines()
                .iter()
                .filter_map(|line| {
                    line.product_id.map(|product_id| PurchaseItemBody {
                        product_id,
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                        expiration_date: line
                            .expiration_date
                            .map(|date| date.format(DATE_FORMAT).to_string())
                            .unwrap_or_default(),
                        batch_code: line.batch_code.clone(),
                    })
                })
                .collect(),
        }
    }
}

// =============================================================================
// Catalog CRUD
// =============================================================================

/// POST `/products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductBody {
    pub code: String,
    pub name: String,
    pub category_id: u64,
    pub presentation_id: u64,
    pub unit: String,
    pub price: Money,
    #[serde(rename = "descuento")]
    pub discount_pct: f64,
    pub stock: i64,
    pub stock_min: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// PUT `/products/{id}` — the business code and current stock are not
/// editable here; stock only moves through sales and purchases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductBody {
    pub id: u64,
    pub name: String,
    pub category_id: u64,
    pub presentation_id: u64,
    pub unit: String,
    pub price: Money,
    #[serde(rename = "descuento")]
    pub discount_pct: f64,
    pub stock_min: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// POST `/providers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProviderBody {
    pub name: String,
    pub nit: String,
    pub phone: String,
    pub address: String,
}

/// PUT `/providers/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProviderBody {
    pub id: u64,
    pub name: String,
    pub nit: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use botica_core::LineItem;
    use chrono::NaiveDate;

    fn ledger_with(lines: Vec<LineItem>) -> Ledger {
        let mut ledger = Ledger::new();
        for line in lines {
            ledger.add_line_with(line);
        }
        ledger
    }

    #[test]
    fn test_sale_items_carry_no_unit_price() {
        let ledger = ledger_with(vec![LineItem {
            product_id: Some(1),
            quantity: 3,
            unit_price: Money::from_cents(550),
            ..LineItem::default()
        }]);

        let body = CreateSaleBody::from_ledger(SalePaymentType::Cash, 42, &ledger);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "payment_type": "efectivo",
                "customer_id": 42,
                "items": [{"product_id": 1, "quantity": 3}]
            })
        );
    }

    #[test]
    fn test_purchase_expiration_date_normalization() {
        let ledger = ledger_with(vec![
            LineItem {
                product_id: Some(1),
                quantity: 100,
                unit_price: Money::from_cents(450),
                expiration_date: NaiveDate::from_ymd_opt(2025, 12, 31),
                batch_code: "BATCH001".to_string(),
            },
            LineItem {
                product_id: Some(3),
                quantity: 50,
                unit_price: Money::from_cents(700),
                expiration_date: None,
                batch_code: "BATCH002".to_string(),
            },
        ]);

        let body = CreatePurchaseBody::from_ledger(4, PurchasePaymentType::Card, &ledger);

        assert_eq!(body.items[0].expiration_date, "2025-12-31");
        assert_eq!(body.items[1].expiration_date, "");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["payment_type"], "tarjeta");
        assert_eq!(json["items"][0]["unit_price"], serde_json::json!(4.5));
    }
}
