//! Outbound ports. Use cases call into persistence through these.
//!
//! Implemented by adapters. One trait per entity kind; the core never holds a
//! store handle across more than one logical operation.

use crate::domain::{Category, DomainError, Inventory, Product, StockEntry, StockEntryId};

/// Persistence for categories.
#[async_trait::async_trait]
pub trait CategoryRepo: Send + Sync {
    /// True if a category with this name exists (case-insensitive).
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    /// Categories whose name contains `pattern` (case-insensitive substring).
    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Category>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError>;

    /// Persist a new category. The store assigns the id.
    async fn create(&self, name: &str) -> Result<Category, DomainError>;

    /// Replace the stored row for `category.id`. Repo error if no such row.
    async fn update(&self, category: &Category) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Persistence for inventories. Same shape as [`CategoryRepo`].
#[async_trait::async_trait]
pub trait InventoryRepo: Send + Sync {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Inventory>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Inventory>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, DomainError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError>;

    async fn create(&self, name: &str) -> Result<Inventory, DomainError>;

    async fn update(&self, inventory: &Inventory) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Persistence for products.
#[async_trait::async_trait]
pub trait ProductRepo: Send + Sync {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Product>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Product>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError>;

    /// Persist a new product. The store assigns the id.
    async fn create(&self, category_id: i64, name: &str) -> Result<Product, DomainError>;

    /// Replace the stored row for `product.id`. Repo error if no such row.
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Persistence for stock entries, keyed by the (product, inventory) composite.
/// No delete: entries are created and re-quantified, never removed by the core.
#[async_trait::async_trait]
pub trait StockRepo: Send + Sync {
    async fn exists_by_id(&self, id: StockEntryId) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: StockEntryId) -> Result<Option<StockEntry>, DomainError>;

    /// All entries for one product across inventories.
    async fn find_by_product(&self, product_id: i64) -> Result<Vec<StockEntry>, DomainError>;

    /// All entries for one inventory across products.
    async fn find_by_inventory(&self, inventory_id: i64) -> Result<Vec<StockEntry>, DomainError>;

    async fn find_all(&self) -> Result<Vec<StockEntry>, DomainError>;

    /// Insert or replace the entry for `entry.id`.
    async fn save(&self, entry: &StockEntry) -> Result<(), DomainError>;
}
