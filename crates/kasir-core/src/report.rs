//! # Sales Reports
//!
//! Summary figures over transaction history: total revenue, cost of goods
//! sold, and gross profit, optionally restricted to a date range.
//!
//! The figures are simple sums of what each transaction already carries;
//! nothing is re-derived here, so an edited transaction contributes its
//! recomputed values automatically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Transaction;

// =============================================================================
// Summary
// =============================================================================

/// Aggregate figures over a slice of transaction history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Sum of transaction totals.
    pub revenue: Money,

    /// Sum of per-transaction COGS.
    pub cogs: Money,

    /// Sum of per-transaction profit.
    pub gross_profit: Money,

    /// Number of transactions counted.
    pub transaction_count: usize,
}

/// Sums revenue, COGS, and gross profit over the given transactions.
///
/// ## Example
/// ```rust
/// use kasir_core::report::summarize;
///
/// let summary = summarize(&[]);
/// assert_eq!(summary.transaction_count, 0);
/// ```
pub fn summarize(transactions: &[Transaction]) -> SalesSummary {
    transactions
        .iter()
        .fold(SalesSummary::default(), |mut acc, t| {
            acc.revenue += t.total;
            acc.cogs += t.cogs;
            acc.gross_profit += t.profit;
            acc.transaction_count += 1;
            acc
        })
}

/// Filters transactions to an inclusive date range.
///
/// Either bound may be omitted to leave that side open. With both bounds
/// omitted the input is returned unchanged, matching the report page's
/// behavior before a range is picked.
pub fn in_range(
    transactions: Vec<Transaction>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|t| from.map_or(true, |f| t.date >= f) && to.map_or(true, |u| t.date <= u))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: i64, total: i64, day: u32) -> Transaction {
        let total = Money::from_rupiah(total);
        let cogs = total.apply_bps(crate::COGS_RATE_BPS);
        Transaction {
            id,
            items: Vec::new(),
            total,
            payment: total,
            change: Money::zero(),
            date: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
            cogs,
            profit: total - cogs,
            customer_name: None,
            customer_phone: None,
        }
    }

    #[test]
    fn test_summary_sums_stored_figures() {
        let summary = summarize(&[tx(1, 85_000, 1), tx(2, 15_000, 2)]);
        assert_eq!(summary.revenue, Money::from_rupiah(100_000));
        assert_eq!(summary.cogs, Money::from_rupiah(40_000));
        assert_eq!(summary.gross_profit, Money::from_rupiah(60_000));
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn test_summary_of_empty_history_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.revenue, Money::zero());
        assert_eq!(summary.transaction_count, 0);
    }

    #[test]
    fn test_range_filter_is_inclusive() {
        let all = vec![tx(1, 10_000, 1), tx(2, 20_000, 5), tx(3, 30_000, 9)];
        let from = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 9, 23, 59, 59).unwrap();

        let picked = in_range(all, Some(from), Some(to));
        let ids: Vec<i64> = picked.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_open_ended_range_keeps_everything() {
        let all = vec![tx(1, 10_000, 1), tx(2, 20_000, 5)];
        assert_eq!(in_range(all.clone(), None, None).len(), all.len());
    }
}
