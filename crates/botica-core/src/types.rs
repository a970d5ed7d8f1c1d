//! # Domain Types
//!
//! Wire-faithful read models for the pharmacy dashboard. Every type here is
//! exclusively owned by the remote entity cache in `botica-api`; composers
//! hold only identifiers plus locally-editable copies of price/quantity.
//!
//! Identity is the backend's numeric id. Monetary fields use [`Money`], which
//! serializes as the decimal numbers the REST contract carries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Payment Types
// =============================================================================

/// Payment type accepted when registering a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SalePaymentType {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta_credito")]
    CreditCard,
    #[serde(rename = "transferencia_bancaria")]
    BankTransfer,
}

impl SalePaymentType {
    pub const ALL: [SalePaymentType; 3] = [
        SalePaymentType::Cash,
        SalePaymentType::CreditCard,
        SalePaymentType::BankTransfer,
    ];

    /// The string the REST backend expects.
    pub const fn wire_value(&self) -> &'static str {
        match self {
            SalePaymentType::Cash => "efectivo",
            SalePaymentType::CreditCard => "tarjeta_credito",
            SalePaymentType::BankTransfer => "transferencia_bancaria",
        }
    }
}

impl Default for SalePaymentType {
    fn default() -> Self {
        SalePaymentType::Cash
    }
}

impl std::fmt::Display for SalePaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl std::str::FromStr for SalePaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "efectivo" => Ok(SalePaymentType::Cash),
            "tarjeta_credito" => Ok(SalePaymentType::CreditCard),
            "transferencia_bancaria" => Ok(SalePaymentType::BankTransfer),
            _ => Err(ValidationError::NotAllowed {
                field: "payment_type".to_string(),
                allowed: SalePaymentType::ALL
                    .iter()
                    .map(|t| t.wire_value().to_string())
                    .collect(),
            }),
        }
    }
}

/// Payment type accepted when registering a purchase.
///
/// Purchases additionally allow supplier credit, which sales do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PurchasePaymentType {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "transferencia")]
    Transfer,
    #[serde(rename = "credito")]
    Credit,
}

impl PurchasePaymentType {
    pub const ALL: [PurchasePaymentType; 4] = [
        PurchasePaymentType::Cash,
        PurchasePaymentType::Card,
        PurchasePaymentType::Transfer,
        PurchasePaymentType::Credit,
    ];

    pub const fn wire_value(&self) -> &'static str {
        match self {
            PurchasePaymentType::Cash => "efectivo",
            PurchasePaymentType::Card => "tarjeta",
            PurchasePaymentType::Transfer => "transferencia",
            PurchasePaymentType::Credit => "credito",
        }
    }
}

impl Default for PurchasePaymentType {
    fn default() -> Self {
        PurchasePaymentType::Cash
    }
}

impl std::fmt::Display for PurchasePaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl std::str::FromStr for PurchasePaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "efectivo" => Ok(PurchasePaymentType::Cash),
            "tarjeta" => Ok(PurchasePaymentType::Card),
            "transferencia" => Ok(PurchasePaymentType::Transfer),
            "credito" => Ok(PurchasePaymentType::Credit),
            _ => Err(ValidationError::NotAllowed {
                field: "payment_type".to_string(),
                allowed: PurchasePaymentType::ALL
                    .iter()
                    .map(|t| t.wire_value().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Server-side status of a committed sale or purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TransactionStatus {
    #[serde(rename = "completada")]
    Completed,
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

// =============================================================================
// Catalog Entities
// =============================================================================

/// A product in the pharmacy catalog.
///
/// Read-only within this core: composers copy `price` into their lines on
/// selection and never write back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: u64,

    /// Business code shown alongside the name in pickers.
    pub code: String,

    pub name: String,

    pub category_id: u64,

    pub presentation_id: u64,

    /// Sale unit ("caja", "blister", "unidad", ...).
    pub unit: String,

    /// Current catalog price.
    pub price: Money,

    /// Flat discount percentage applied by the backend, 0-100.
    #[serde(rename = "descuento")]
    pub discount_pct: f64,

    /// Current stock level.
    pub stock: i64,

    /// Threshold below which the dashboard flags low stock.
    pub stock_min: i64,

    #[serde(default)]
    pub description: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether current stock sits at or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_min
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Presentation {
    pub id: u64,
    pub name: String,
}

// =============================================================================
// Counterparties
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: u64,
    pub full_name: String,
    /// National identity document number.
    pub ci: String,
    pub address: String,
    pub phone: String,
}

/// A supplier of purchased stock.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Provider {
    pub id: u64,
    pub name: String,
    /// Tax identification number.
    pub nit: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Committed Transactions
// =============================================================================

/// A committed sale as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: u64,
    pub client_id: u64,
    pub user_id: u64,
    pub total: Money,
    pub payment_type: SalePaymentType,
    pub status: TransactionStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Present only when the backend expands line details.
    #[serde(default)]
    pub items: Option<Vec<SaleItemRow>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItemRow {
    pub product_id: u64,
    pub quantity: i64,
}

/// A committed purchase as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub id: u64,
    pub provider_id: u64,
    pub user_id: u64,
    pub total: Money,
    pub payment_type: PurchasePaymentType,
    pub status: TransactionStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Option<Vec<PurchaseItemRow>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseItemRow {
    pub id: u64,
    pub purchase_id: u64,
    pub product_id: u64,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
    #[ts(as = "String")]
    pub expiration_date: NaiveDate,
    pub batch_code: String,
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination metadata reported by the backend.
///
/// `total_items` is authoritative; a page may be partial, so it is never
/// derived from `data.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// The shape served before any page has been fetched.
    pub fn empty() -> Self {
        PageInfo {
            current_page: 1,
            total_pages: 0,
            total_items: 0,
            page_size: 10,
            has_next: false,
            has_previous: false,
        }
    }

    /// Invariant check: `has_next ⇔ current_page < total_pages` and
    /// `has_previous ⇔ current_page > 1`.
    pub fn is_consistent(&self) -> bool {
        self.has_next == (self.current_page < self.total_pages)
            && self.has_previous == (self.current_page > 1)
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        PageInfo::empty()
    }
}

/// One page of a remote collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// The default shape served before the first fetch completes.
    pub fn empty() -> Self {
        Page {
            data: Vec::new(),
            pagination: PageInfo::empty(),
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_payment_wire_values() {
        assert_eq!(
            serde_json::to_value(SalePaymentType::Cash).unwrap(),
            serde_json::json!("efectivo")
        );
        assert_eq!(
            serde_json::to_value(SalePaymentType::CreditCard).unwrap(),
            serde_json::json!("tarjeta_credito")
        );
        assert_eq!(
            serde_json::to_value(SalePaymentType::BankTransfer).unwrap(),
            serde_json::json!("transferencia_bancaria")
        );
    }

    #[test]
    fn test_purchase_payment_round_trip() {
        for payment in PurchasePaymentType::ALL {
            let parsed: PurchasePaymentType = payment.wire_value().parse().unwrap();
            assert_eq!(parsed, payment);
        }
        assert!("cheque".parse::<PurchasePaymentType>().is_err());
    }

    #[test]
    fn test_page_info_consistency() {
        let mut info = PageInfo {
            current_page: 2,
            total_pages: 5,
            total_items: 42,
            page_size: 10,
            has_next: true,
            has_previous: true,
        };
        assert!(info.is_consistent());

        info.has_next = false;
        assert!(!info.is_consistent());

        assert!(PageInfo::empty().is_consistent());
    }

    #[test]
    fn test_product_low_stock() {
        let product = Product {
            id: 1,
            code: "PARA-500".to_string(),
            name: "Paracetamol 500mg".to_string(),
            category_id: 1,
            presentation_id: 1,
            unit: "caja".to_string(),
            price: Money::from_cents(550),
            discount_pct: 0.0,
            stock: 3,
            stock_min: 5,
            description: None,
            created_at: Utc::now(),
        };
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_product_deserializes_wire_shape() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 7,
            "code": "IBU-400",
            "name": "Ibuprofeno 400mg",
            "category_id": 2,
            "presentation_id": 1,
            "unit": "caja",
            "price": 6.0,
            "descuento": 10.0,
            "stock": 80,
            "stock_min": 10,
            "created_at": "2023-11-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(product.price.cents(), 600);
        assert_eq!(product.discount_pct, 10.0);
        assert_eq!(product.description, None);
    }
}
