//! stockroom: inventory domain core (categories, products, inventories, stock)
//! with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
