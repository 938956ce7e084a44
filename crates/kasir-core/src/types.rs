//! # Domain Types
//!
//! Core domain types used throughout Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │  Transaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │──►│  product fields │──►│  id (ledger)    │       │
//! │  │  barcodes       │   │  + quantity     │   │  items snapshot │       │
//! │  │  price, stock   │   │  (ephemeral)    │   │  total/payment  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockItem     │   │   AppSettings   │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product +      │   │  store identity │   │  optional name  │       │
//! │  │  threshold      │   │  receipt footer │   │  and phone      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartItem` carries a full copy of the product at the time it was added.
//! Completed transactions keep that copy forever, so editing or deleting a
//! catalog product never rewrites history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier. Caller-supplied; the item form derives it from a
    /// millisecond timestamp, so collisions are last-write-wins.
    pub id: i64,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Unit price in whole rupiah.
    pub price: Money,

    /// Category label used for catalog grouping.
    pub category: String,

    /// Scan codes for this product. At least one; unique within the product.
    pub barcodes: Vec<String>,

    /// Current stock level.
    pub stock: i64,

    /// Opaque image reference (URL or data string). Rendering is external.
    pub image: String,
}

impl Product {
    /// Checks whether any of the product's barcodes equals `code`,
    /// ignoring case. Used by the scan flow.
    pub fn matches_barcode(&self, code: &str) -> bool {
        self.barcodes.iter().any(|b| b.eq_ignore_ascii_case(code))
    }

    /// Checks whether the product matches a search term: case-insensitive
    /// substring of the name or of any barcode.
    ///
    /// An empty term matches everything.
    pub fn matches_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .barcodes
                .iter()
                .any(|b| b.to_lowercase().contains(&term))
    }

    /// Whether the stock level is below the low-stock threshold.
    ///
    /// Used only for a warning badge; never blocks a sale.
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in a draft cart or a completed transaction snapshot.
///
/// Carries the full product copy plus a quantity. Ephemeral: it exists only
/// inside a draft or inside a transaction's frozen item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id at the time of adding.
    pub product_id: i64,

    /// Product name at the time of adding (frozen).
    pub name: String,

    /// Unit price at the time of adding (frozen). If the catalog price
    /// changes later, this line keeps the original.
    pub price: Money,

    /// Category at the time of adding.
    pub category: String,

    /// Barcodes at the time of adding.
    pub barcodes: Vec<String>,

    /// Stock level observed when the line was created. Informational only.
    pub stock: i64,

    /// Image reference at the time of adding.
    pub image: String,

    /// Quantity of this product in the cart. Always >= 1; a quantity that
    /// would drop to 0 removes the line instead.
    pub quantity: i64,
}

impl CartItem {
    /// Creates a cart line from a product snapshot and a quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            barcodes: product.barcodes.clone(),
            stock: product.stock,
            image: product.image.clone(),
            quantity,
        }
    }

    /// The line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Optional customer details attached to a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl Customer {
    /// A customer with no details (anonymous walk-in).
    pub fn anonymous() -> Self {
        Customer::default()
    }

    /// Normalizes empty strings to `None` so blank form fields don't
    /// persist as empty values.
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Customer {
            name: clean(self.name),
            phone: clean(self.phone),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale in the ledger.
///
/// Immutable once recorded, except through the explicit edit flow which
/// re-derives all money figures from a revised item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger-assigned id.
    pub id: i64,

    /// Frozen cart lines at checkout time.
    pub items: Vec<CartItem>,

    /// Sum of line totals.
    pub total: Money,

    /// Amount tendered by the customer. Always >= total.
    pub payment: Money,

    /// payment - total.
    pub change: Money,

    /// When the sale was completed.
    pub date: DateTime<Utc>,

    /// Cost of goods sold: a fixed 40% of total. Placeholder costing model.
    pub cogs: Money,

    /// total - cogs.
    pub profit: Money,

    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

/// A transaction that has not been assigned a ledger id yet.
///
/// Produced by the checkout calculator; the ledger assigns the id when it
/// records the sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub items: Vec<CartItem>,
    pub total: Money,
    pub payment: Money,
    pub change: Money,
    pub date: DateTime<Utc>,
    pub cogs: Money,
    pub profit: Money,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

impl NewTransaction {
    /// Attaches a ledger-assigned id, producing the stored form.
    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            items: self.items,
            total: self.total,
            payment: self.payment,
            change: self.change,
            date: self.date,
            cogs: self.cogs,
            profit: self.profit,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
        }
    }
}

// =============================================================================
// Stock Item
// =============================================================================

/// A catalog product viewed through the stock page: the product plus the
/// threshold it is judged against.
///
/// Read-derived. The threshold is a crate constant attached on read, never
/// persisted per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    #[serde(flatten)]
    pub product: Product,

    /// Stock level below which the product is flagged.
    pub threshold: i64,
}

impl From<Product> for StockItem {
    fn from(product: Product) -> Self {
        StockItem {
            product,
            threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

impl StockItem {
    /// Whether this item should carry the low-stock badge.
    pub fn is_low(&self) -> bool {
        self.product.stock < self.threshold
    }
}

// =============================================================================
// App Settings
// =============================================================================

/// Store identity and receipt text. A single record, overwritten wholesale
/// on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Store name shown in the header and on receipts.
    pub app_name: String,

    /// Store address printed on receipts.
    pub address: String,

    /// Store phone number printed on receipts.
    pub phone: String,

    /// Closing line printed at the bottom of receipts.
    pub receipt_footer: String,
}

impl Default for AppSettings {
    /// The canned record used until the cashier saves their own.
    fn default() -> Self {
        AppSettings {
            app_name: "E-Kasir".to_string(),
            address: "Jl. Jenderal Sudirman No. 1, Jakarta".to_string(),
            phone: "021-12345678".to_string(),
            receipt_footer: "Terima kasih atas kunjungan Anda!".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
