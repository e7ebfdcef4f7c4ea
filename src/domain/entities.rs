//! Domain entities. Pure data structures for the inventory core.
//!
//! No storage/IO types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// A product category. Name is globally unique among categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A physical or logical inventory location. Name is globally unique among inventories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: i64,
    pub name: String,
}

/// A product. Belongs to exactly one category; name is globally unique among products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
}

/// Composite identity of a stock entry: one product in one inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockEntryId {
    pub product_id: i64,
    pub inventory_id: i64,
}

impl StockEntryId {
    pub fn new(product_id: i64, inventory_id: i64) -> Self {
        Self {
            product_id,
            inventory_id,
        }
    }
}

/// Quantity of a product held in an inventory. Identified by the composite key;
/// quantity is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    #[serde(flatten)]
    pub id: StockEntryId,
    pub quantity: i64,
}
