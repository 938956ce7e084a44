//! # Validation Module
//!
//! Input validation for the item form and the money-bearing operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate inline feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation before anything is persisted             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL constraints and indexes                                  │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Espresso").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a barcode list.
///
/// ## Rules
/// - At least one barcode
/// - No empty barcode
/// - No barcode listed twice (case-insensitive)
pub fn validate_barcodes(barcodes: &[String]) -> ValidationResult<()> {
    if barcodes.is_empty() {
        return Err(ValidationError::Required {
            field: "barcodes".to_string(),
        });
    }

    let mut seen: Vec<String> = Vec::with_capacity(barcodes.len());
    for barcode in barcodes {
        let code = barcode.trim();
        if code.is_empty() {
            return Err(ValidationError::Required {
                field: "barcode".to_string(),
            });
        }

        let folded = code.to_lowercase();
        if seen.contains(&folded) {
            return Err(ValidationError::Duplicate {
                field: "barcode".to_string(),
                value: code.to_string(),
            });
        }
        seen.push(folded);
    }

    Ok(())
}

/// Validates a line quantity.
///
/// Note that a quantity of zero is legal at the cart layer (it removes the
/// line); this validator guards places that require an actual line, such
/// as the transaction edit form.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a tendered payment amount.
///
/// ## Rules
/// - Must be non-negative. Whether it covers the total is a checkout
///   decision, not a field rule.
pub fn validate_payment(payment: Money) -> ValidationResult<()> {
    if payment.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "payment".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a whole product before it is written to the catalog.
///
/// Composes the field validators: non-empty name, non-negative price and
/// stock, at least one unique barcode.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    validate_barcodes(&product.barcodes)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> Product {
        Product {
            id: 1,
            name: "Espresso".to_string(),
            price: Money::from_rupiah(25_000),
            category: "Kopi".to_string(),
            barcodes: vec!["CF-001".to_string()],
            stock: 100,
            image: String::new(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Espresso").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_rupiah(25_000)).is_ok());
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_rupiah(-1)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(100).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_barcodes() {
        assert!(validate_barcodes(&["CF-001".to_string()]).is_ok());
        assert!(validate_barcodes(&[]).is_err());
        assert!(validate_barcodes(&["".to_string()]).is_err());
        // Case-insensitive duplicate
        assert!(validate_barcodes(&["CF-001".to_string(), "cf-001".to_string()]).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
    }

    #[test]
    fn test_validate_product_composes() {
        assert!(validate_product(&valid_product()).is_ok());

        let mut nameless = valid_product();
        nameless.name = String::new();
        assert!(validate_product(&nameless).is_err());

        let mut codeless = valid_product();
        codeless.barcodes.clear();
        assert!(validate_product(&codeless).is_err());
    }
}
