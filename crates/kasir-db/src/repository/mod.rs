//! # Repositories
//!
//! One repository per stored collection:
//!
//! - [`product`] - the catalog (plus stock-only updates and search)
//! - [`transaction`] - the append-only sales ledger
//! - [`settings`] - the singleton store-identity record

pub mod product;
pub mod settings;
pub mod transaction;
