//! Port traits. API boundaries for the hexagon.
//!
//! Outbound: called by use cases into persistence adapters.

pub mod outbound;

pub use outbound::{CategoryRepo, InventoryRepo, ProductRepo, StockRepo};
