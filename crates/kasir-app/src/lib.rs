//! # kasir-app: Application Service Layer for Kasir
//!
//! The orchestration layer between a front end and the engine: in-memory
//! draft sessions plus the persisted catalog, ledger, and settings.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir Architecture                               │
//! │                                                                         │
//! │  Front end (external: tables, dialogs, receipt rendering)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ kasir-app (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐         │   │
//! │  │   │    Pos    │      │ Session   │      │ ApiError  │         │   │
//! │  │   │ (service) │ ───► │  State    │      │ ErrorCode │         │   │
//! │  │   └─────┬─────┘      └───────────┘      └───────────┘         │   │
//! │  │         │                                                      │   │
//! │  └─────────┼──────────────────────────────────────────────────────┘   │
//! │            │                                                            │
//! │    ┌───────┴────────┐                                                  │
//! │    ▼                ▼                                                  │
//! │  kasir-core       kasir-db                                             │
//! │  (pure logic)     (SQLite)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use kasir_app::{Pos, ApiError};
//! use kasir_core::{Customer, Money};
//! use kasir_db::DbConfig;
//!
//! let pos = Pos::open(DbConfig::new("./kasir.db")).await?;
//!
//! let draft = pos.active_draft();
//! pos.add_to_cart(&draft.id, 1).await?;
//!
//! let sale = pos
//!     .checkout(&draft.id, Money::from_rupiah(100_000), Customer::anonymous())
//!     .await?;
//! println!("change: {}", sale.change);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ApiError, ErrorCode};
pub use service::Pos;
pub use state::SessionState;
