//! Core domain layer. No external I/O dependencies.
//!
//! Entities, request objects and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod requests;

pub use entities::{Category, Inventory, Product, StockEntry, StockEntryId};
pub use errors::DomainError;
pub use requests::{NameRequest, ProductRequest, StockEntryRequest};
