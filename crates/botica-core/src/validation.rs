//! # Validation Module
//!
//! Synchronous, per-field validation for transaction drafts.
//!
//! These checks run entirely on the client before a phase transition is
//! allowed; the backend performs its own final validation at commit time.

use crate::composer::CustomerDraft;
use crate::error::{LineError, ValidationError, ValidationResult};
use crate::ledger::LineItem;
use crate::money::Money;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a text field is non-blank after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity. Must be a whole number of at least 1.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a line unit price. Zero-priced lines are rejected; a free item
/// is not a sellable line in this catalog.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates a single ledger line, reporting every failing field.
pub fn validate_line(index: usize, line: &LineItem) -> Vec<LineError> {
    let mut errors = Vec::new();

    if line.product_id.is_none() {
        errors.push(LineError {
            index,
            error: ValidationError::Required {
                field: "product_id".to_string(),
            },
        });
    }

    if let Err(error) = validate_quantity(line.quantity) {
        errors.push(LineError { index, error });
    }

    if let Err(error) = validate_unit_price(line.unit_price) {
        errors.push(LineError { index, error });
    }

    errors
}

/// Validates the new-customer draft captured in the sale composer's second
/// phase. Every field is required; no format rules beyond non-blank.
pub fn validate_customer_draft(draft: &CustomerDraft) -> Vec<ValidationError> {
    let fields = [
        ("full_name", draft.full_name.as_str()),
        ("ci", draft.ci.as_str()),
        ("address", draft.address.as_str()),
        ("phone", draft.phone.as_str()),
    ];

    fields
        .iter()
        .filter_map(|(name, value)| validate_required(name, value).err())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("full_name", "Ana Ruiz").is_ok());
        assert!(validate_required("full_name", "").is_err());
        assert!(validate_required("full_name", "   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
    }

    #[test]
    fn test_validate_line_reports_every_field() {
        let line = LineItem::default();
        // Default line: no product, quantity 1, price 0
        let errors = validate_line(0, &line);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_customer_draft() {
        let mut draft = CustomerDraft {
            full_name: "Ana Ruiz".to_string(),
            ci: "12345".to_string(),
            address: "Calle 1".to_string(),
            phone: "70000000".to_string(),
        };
        assert!(validate_customer_draft(&draft).is_empty());

        draft.phone.clear();
        draft.ci = "  ".to_string();
        let errors = validate_customer_draft(&draft);
        assert_eq!(errors.len(), 2);
    }
}
