//! # kasir-core: Pure Business Logic for Kasir
//!
//! This crate is the **heart** of Kasir. It contains all business logic
//! as pure functions and in-memory state machines with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kasir Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (external)                         │   │
//! │  │    Catalog UI ──► Session tabs ──► Tender UI ──► Reports UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kasir-app (service layer)                      │   │
//! │  │    add_to_cart, checkout, edit_transaction, reports, ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  session  │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Money   │  │ DraftCart │  │  settle   │  │   │
//! │  │   │   ...     │  │  (rupiah) │  │SessionBook│  │quick cash │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Transaction, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`session`] - Multi-session draft-cart manager
//! - [`checkout`] - Totals, payment gate, quick cash, settlement
//! - [`report`] - Sales summaries over transaction history
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic given its inputs
//!    (settlement stamps the current time, nothing else is ambient)
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole rupiah (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::{cart_total, settle};
//! use kasir_core::money::Money;
//! use kasir_core::session::SessionBook;
//! use kasir_core::types::{Customer, Product};
//!
//! let espresso = Product {
//!     id: 1,
//!     name: "Espresso".to_string(),
//!     price: Money::from_rupiah(25_000),
//!     category: "Kopi".to_string(),
//!     barcodes: vec!["CF-001".to_string()],
//!     stock: 100,
//!     image: String::new(),
//! };
//!
//! let mut book = SessionBook::new();
//! let draft_id = book.active_id().to_string();
//! book.add_to_cart(&draft_id, &espresso).unwrap();
//! book.add_to_cart(&draft_id, &espresso).unwrap();
//!
//! let items = book.active().items.clone();
//! assert_eq!(cart_total(&items), Money::from_rupiah(50_000));
//!
//! let tx = settle(items, Money::from_rupiah(50_000), Customer::anonymous()).unwrap();
//! assert_eq!(tx.change, Money::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kasir_core::Money` instead of
// `use kasir_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::SalesSummary;
pub use session::{DraftCart, SessionBook};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product is flagged as low.
///
/// ## Why a constant?
/// The stock view shows a per-item threshold, but nothing ever writes one;
/// it is a single store-wide knob. Kept as a constant until a real
/// per-product requirement appears.
pub const LOW_STOCK_THRESHOLD: i64 = 20;

/// COGS share of a transaction total, in basis points (4000 = 40%).
///
/// ## Business Reason
/// A placeholder costing model: cost of goods is assumed to be a fixed
/// share of revenue, and profit is the remainder. Real per-product cost
/// tracking would replace this.
pub const COGS_RATE_BPS: u32 = 4000;

/// Round rupiah bill amounts offered as quick-cash suggestions.
pub const QUICK_CASH_DENOMINATIONS: [i64; 4] = [10_000, 20_000, 50_000, 100_000];

/// Maximum number of quick-cash suggestions shown at the tender step.
pub const MAX_QUICK_CASH_OPTIONS: usize = 6;

/// Prefix for auto-generated draft session names ("Sesi 1", "Sesi 2", ...).
pub const SESSION_NAME_PREFIX: &str = "Sesi";
