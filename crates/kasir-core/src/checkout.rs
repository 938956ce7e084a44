//! # Checkout Calculator
//!
//! Pure payment math: totals, the payment gate, change, quick-cash
//! suggestions, and assembly of the transaction record.
//!
//! ## Tender Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tender Flow                                       │
//! │                                                                         │
//! │  Active draft items                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart_total() ──► Rp85.000                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quick_cash_options() ──► [Rp85.000, Rp90.000, Rp100.000]              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cashier tenders Rp100.000                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  settle() ── payment >= total? ──► NewTransaction                       │
//! │       │              │              change Rp15.000                     │
//! │       │              └─ no ──► InsufficientPayment (confirm disabled)   │
//! │       ▼                                                                 │
//! │  ledger records it                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no partial-payment or split-payment concept: a sale is settled
//! by a single tender that covers the total, or not at all.

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Customer, NewTransaction, Transaction};
use crate::{COGS_RATE_BPS, MAX_QUICK_CASH_OPTIONS, QUICK_CASH_DENOMINATIONS};

// =============================================================================
// Totals
// =============================================================================

/// Sums the line totals of a cart.
///
/// ## Example
/// ```rust
/// use kasir_core::checkout::cart_total;
/// use kasir_core::money::Money;
///
/// let total = cart_total(&[]);
/// assert_eq!(total, Money::zero());
/// ```
pub fn cart_total(items: &[CartItem]) -> Money {
    items.iter().map(|i| i.line_total()).sum()
}

/// Splits a total into (cogs, profit) at the fixed 40/60 ratio.
///
/// Profit is derived by subtraction so the two parts always reconstruct
/// the total exactly, whatever the rounding of the 40% portion did.
pub fn split_cogs(total: Money) -> (Money, Money) {
    let cogs = total.apply_bps(COGS_RATE_BPS);
    (cogs, total - cogs)
}

// =============================================================================
// Quick Cash
// =============================================================================

/// Suggested round tender amounts for a given total.
///
/// ## Behavior
/// - Always contains the exact total
/// - Adds the smallest multiple of each denomination that covers the total
/// - Deduplicated, ascending, at most [`MAX_QUICK_CASH_OPTIONS`] entries
///
/// This is a UI convenience, not a financial rule: every suggestion is a
/// valid tender (>= total).
///
/// ## Example
/// ```rust
/// use kasir_core::checkout::quick_cash_options;
/// use kasir_core::money::Money;
///
/// let options = quick_cash_options(Money::from_rupiah(85_000));
/// let amounts: Vec<i64> = options.iter().map(|m| m.rupiah()).collect();
/// assert_eq!(amounts, vec![85_000, 90_000, 100_000]);
/// ```
pub fn quick_cash_options(total: Money) -> Vec<Money> {
    let mut options = vec![total];
    for denom in QUICK_CASH_DENOMINATIONS {
        options.push(total.round_up_to(denom));
    }

    options.sort();
    options.dedup();
    options.truncate(MAX_QUICK_CASH_OPTIONS);
    options
}

// =============================================================================
// Settlement
// =============================================================================

/// Settles a cart against a tendered payment, producing the transaction
/// the ledger will record.
///
/// ## Errors
/// - [`CoreError::EmptyCart`] when there is nothing to sell
/// - [`CoreError::InsufficientPayment`] when `payment < total`; the caller
///   keeps the confirm action disabled on this condition rather than
///   surfacing a failure
pub fn settle(
    items: Vec<CartItem>,
    payment: Money,
    customer: Customer,
) -> CoreResult<NewTransaction> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let total = cart_total(&items);
    if payment < total {
        return Err(CoreError::InsufficientPayment { total, payment });
    }

    let (cogs, profit) = split_cogs(total);
    let customer = customer.normalized();

    Ok(NewTransaction {
        items,
        total,
        payment,
        change: payment - total,
        date: Utc::now(),
        cogs,
        profit,
        customer_name: customer.name,
        customer_phone: customer.phone,
    })
}

/// Applies the edit flow to a stored transaction: re-derives every money
/// figure from the revised item list and payment.
///
/// The id and original date are kept; items, payment, and customer fields
/// are replaced wholesale.
///
/// ## Errors
/// Same gates as [`settle`]: the revised list must be non-empty and the
/// revised payment must cover the revised total. A payment below the new
/// total is rejected so the caller can show the error instead of saving.
pub fn revise(
    original: &Transaction,
    items: Vec<CartItem>,
    payment: Money,
    customer: Customer,
) -> CoreResult<Transaction> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let total = cart_total(&items);
    if payment < total {
        return Err(CoreError::InsufficientPayment { total, payment });
    }

    let (cogs, profit) = split_cogs(total);
    let customer = customer.normalized();

    Ok(Transaction {
        id: original.id,
        items,
        total,
        payment,
        change: payment - total,
        date: original.date,
        cogs,
        profit,
        customer_name: customer.name,
        customer_phone: customer.phone,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Money::from_rupiah(price),
            category: "Kopi".to_string(),
            barcodes: vec![format!("CF-{:03}", id)],
            stock: 100,
            image: String::new(),
        }
    }

    fn two_coffee_cart() -> Vec<CartItem> {
        vec![
            CartItem::from_product(&product(1, "Espresso", 25_000), 2),
            CartItem::from_product(&product(2, "Latte", 35_000), 1),
        ]
    }

    #[test]
    fn test_cart_total() {
        assert_eq!(cart_total(&two_coffee_cart()), Money::from_rupiah(85_000));
        assert_eq!(cart_total(&[]), Money::zero());
    }

    #[test]
    fn test_settle_canonical_scenario() {
        // Espresso 25.000 × 2 + Latte 35.000 × 1, tendering 100.000
        let tx = settle(
            two_coffee_cart(),
            Money::from_rupiah(100_000),
            Customer::anonymous(),
        )
        .unwrap();

        assert_eq!(tx.total, Money::from_rupiah(85_000));
        assert_eq!(tx.change, Money::from_rupiah(15_000));
        assert_eq!(tx.cogs, Money::from_rupiah(34_000));
        assert_eq!(tx.profit, Money::from_rupiah(51_000));
        assert_eq!(tx.items.len(), 2);
    }

    #[test]
    fn test_settle_exact_payment_gives_zero_change() {
        let tx = settle(
            two_coffee_cart(),
            Money::from_rupiah(85_000),
            Customer::anonymous(),
        )
        .unwrap();
        assert_eq!(tx.change, Money::zero());
    }

    #[test]
    fn test_settle_rejects_insufficient_payment() {
        let result = settle(
            two_coffee_cart(),
            Money::from_rupiah(84_999),
            Customer::anonymous(),
        );
        assert!(matches!(
            result,
            Err(CoreError::InsufficientPayment { .. })
        ));
    }

    #[test]
    fn test_settle_rejects_empty_cart() {
        let result = settle(Vec::new(), Money::from_rupiah(100_000), Customer::anonymous());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_settle_keeps_customer_fields() {
        let tx = settle(
            two_coffee_cart(),
            Money::from_rupiah(100_000),
            Customer {
                name: Some("Budi".to_string()),
                phone: Some("0812345".to_string()),
            },
        )
        .unwrap();
        assert_eq!(tx.customer_name.as_deref(), Some("Budi"));
        assert_eq!(tx.customer_phone.as_deref(), Some("0812345"));
    }

    #[test]
    fn test_cogs_profit_reconstruct_total() {
        // A total that does not divide evenly at 40%
        let total = Money::from_rupiah(12_345);
        let (cogs, profit) = split_cogs(total);
        assert_eq!(cogs + profit, total);
    }

    #[test]
    fn test_quick_cash_contains_exact_total() {
        for rupiah in [1, 7_500, 85_000, 100_000, 123_456] {
            let total = Money::from_rupiah(rupiah);
            assert!(quick_cash_options(total).contains(&total));
        }
    }

    #[test]
    fn test_quick_cash_sorted_and_deduplicated() {
        let options = quick_cash_options(Money::from_rupiah(85_000));
        let mut sorted = options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(options, sorted);
        assert!(options.len() <= MAX_QUICK_CASH_OPTIONS);
    }

    #[test]
    fn test_quick_cash_every_option_covers_total() {
        let total = Money::from_rupiah(123_456);
        for option in quick_cash_options(total) {
            assert!(option >= total);
        }
    }

    #[test]
    fn test_quick_cash_round_total_collapses() {
        // 100.000 is itself a denomination multiple of every entry
        let options = quick_cash_options(Money::from_rupiah(100_000));
        assert_eq!(options, vec![Money::from_rupiah(100_000)]);
    }

    #[test]
    fn test_revise_lowering_total_raises_change() {
        let original = settle(
            two_coffee_cart(),
            Money::from_rupiah(100_000),
            Customer::anonymous(),
        )
        .unwrap()
        .with_id(1);

        // Drop the Latte line, keep the stored payment
        let revised_items = vec![CartItem::from_product(&product(1, "Espresso", 25_000), 2)];
        let revised = revise(
            &original,
            revised_items,
            original.payment,
            Customer::anonymous(),
        )
        .unwrap();

        assert_eq!(revised.id, original.id);
        assert_eq!(revised.date, original.date);
        assert_eq!(revised.total, Money::from_rupiah(50_000));
        assert_eq!(revised.change, Money::from_rupiah(50_000));
        assert_eq!(revised.cogs, Money::from_rupiah(20_000));
        assert_eq!(revised.profit, Money::from_rupiah(30_000));
    }

    #[test]
    fn test_revise_raising_total_above_payment_is_rejected() {
        let original = settle(
            two_coffee_cart(),
            Money::from_rupiah(85_000),
            Customer::anonymous(),
        )
        .unwrap()
        .with_id(1);

        // Double the espresso quantity; stored payment no longer covers it
        let revised_items = vec![
            CartItem::from_product(&product(1, "Espresso", 25_000), 4),
            CartItem::from_product(&product(2, "Latte", 35_000), 1),
        ];
        let result = revise(
            &original,
            revised_items,
            original.payment,
            Customer::anonymous(),
        );
        assert!(matches!(
            result,
            Err(CoreError::InsufficientPayment { .. })
        ));
    }
}
