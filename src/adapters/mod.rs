//! Infrastructure adapters. Implement the outbound ports.
//!
//! SQLite and in-memory persistence. Map infrastructure errors to DomainError.

pub mod persistence;
