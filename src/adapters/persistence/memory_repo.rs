//! In-memory store implementing all four repo ports.
//!
//! Backs the ephemeral mode and the use-case tests. Same visible semantics as
//! the SQLite store: case-insensitive name uniqueness checks, substring name
//! filters, store-assigned ids starting at 1.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{Category, DomainError, Inventory, Product, StockEntry, StockEntryId};
use crate::ports::{CategoryRepo, InventoryRepo, ProductRepo, StockRepo};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    inventories: Vec<Inventory>,
    products: Vec<Product>,
    stock: HashMap<StockEntryId, i64>,
    next_id: i64,
}

impl Tables {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store. Safe to share via `Arc`; all state is behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_matches(name: &str, pattern: &str) -> bool {
    name.to_lowercase().contains(&pattern.to_lowercase())
}

#[async_trait::async_trait]
impl CategoryRepo for MemoryStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name)))
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Category>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .filter(|c| name_matches(&c.name, pattern))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().any(|c| c.id == id))
    }

    async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let mut tables = self.tables.write().await;
        let category = Category {
            id: tables.assign_id(),
            name: name.to_string(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => {
                *slot = category.clone();
                Ok(())
            }
            None => Err(DomainError::Repo(format!(
                "no category row with id {}",
                category.id
            ))),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.categories.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryRepo for MemoryStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .inventories
            .iter()
            .any(|i| i.name.eq_ignore_ascii_case(name)))
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Inventory>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .inventories
            .iter()
            .filter(|i| name_matches(&i.name, pattern))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Inventory>, DomainError> {
        Ok(self.tables.read().await.inventories.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.inventories.iter().find(|i| i.id == id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.inventories.iter().any(|i| i.id == id))
    }

    async fn create(&self, name: &str) -> Result<Inventory, DomainError> {
        let mut tables = self.tables.write().await;
        let inventory = Inventory {
            id: tables.assign_id(),
            name: name.to_string(),
        };
        tables.inventories.push(inventory.clone());
        Ok(inventory)
    }

    async fn update(&self, inventory: &Inventory) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.inventories.iter_mut().find(|i| i.id == inventory.id) {
            Some(slot) => {
                *slot = inventory.clone();
                Ok(())
            }
            None => Err(DomainError::Repo(format!(
                "no inventory row with id {}",
                inventory.id
            ))),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.inventories.retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductRepo for MemoryStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name)))
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Product>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| name_matches(&p.name, pattern))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.tables.read().await.products.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().any(|p| p.id == id))
    }

    async fn create(&self, category_id: i64, name: &str) -> Result<Product, DomainError> {
        let mut tables = self.tables.write().await;
        let product = Product {
            id: tables.assign_id(),
            category_id,
            name: name.to_string(),
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(DomainError::Repo(format!(
                "no product row with id {}",
                product.id
            ))),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.products.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl StockRepo for MemoryStore {
    async fn exists_by_id(&self, id: StockEntryId) -> Result<bool, DomainError> {
        Ok(self.tables.read().await.stock.contains_key(&id))
    }

    async fn find_by_id(&self, id: StockEntryId) -> Result<Option<StockEntry>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stock
            .get(&id)
            .map(|&quantity| StockEntry { id, quantity }))
    }

    async fn find_by_product(&self, product_id: i64) -> Result<Vec<StockEntry>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stock
            .iter()
            .filter(|(id, _)| id.product_id == product_id)
            .map(|(&id, &quantity)| StockEntry { id, quantity })
            .collect())
    }

    async fn find_by_inventory(&self, inventory_id: i64) -> Result<Vec<StockEntry>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stock
            .iter()
            .filter(|(id, _)| id.inventory_id == inventory_id)
            .map(|(&id, &quantity)| StockEntry { id, quantity })
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<StockEntry>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stock
            .iter()
            .map(|(&id, &quantity)| StockEntry { id, quantity })
            .collect())
    }

    async fn save(&self, entry: &StockEntry) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.stock.insert(entry.id, entry.quantity);
        Ok(())
    }
}
