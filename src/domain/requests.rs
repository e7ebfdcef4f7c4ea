//! Parsed request objects handed in by the transport collaborator.
//!
//! Fields are `Option` so validators can distinguish "absent" from a bad value.

use serde::{Deserialize, Serialize};

/// Create/update request for name-only entities (categories, inventories).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRequest {
    pub name: Option<String>,
}

impl NameRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Create/update request for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category_id: Option<i64>,
}

impl ProductRequest {
    pub fn new(name: impl Into<String>, category_id: i64) -> Self {
        Self {
            name: Some(name.into()),
            category_id: Some(category_id),
        }
    }
}

/// Create/update request for a stock entry. The (product, inventory) pair is the
/// identity; update only ever replaces the quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntryRequest {
    pub product_id: Option<i64>,
    pub inventory_id: Option<i64>,
    pub quantity: Option<i64>,
}

impl StockEntryRequest {
    pub fn new(product_id: i64, inventory_id: i64, quantity: i64) -> Self {
        Self {
            product_id: Some(product_id),
            inventory_id: Some(inventory_id),
            quantity: Some(quantity),
        }
    }
}
