//! Stock entry create/list/update over the composite (product, inventory) key.
//!
//! Both foreign references are checked on create; identifiers are immutable
//! once an entry exists, so update only replaces the quantity.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, StockEntry, StockEntryId, StockEntryRequest};
use crate::ports::{InventoryRepo, ProductRepo, StockRepo};
use crate::usecases::validation::validate_stock_request;

pub struct StockService {
    stock: Arc<dyn StockRepo>,
    products: Arc<dyn ProductRepo>,
    inventories: Arc<dyn InventoryRepo>,
}

impl StockService {
    pub fn new(
        stock: Arc<dyn StockRepo>,
        products: Arc<dyn ProductRepo>,
        inventories: Arc<dyn InventoryRepo>,
    ) -> Self {
        Self {
            stock,
            products,
            inventories,
        }
    }

    /// Create a stock entry for an existing product/inventory pair. Fails
    /// duplicate when the composite key is taken, invalid-reference when
    /// either side does not exist. All checks precede the single write.
    pub async fn create(&self, request: &StockEntryRequest) -> Result<StockEntry, DomainError> {
        validate_stock_request(request)?;
        let (id, quantity) = Self::key_and_quantity(request);

        if self.stock.exists_by_id(id).await? {
            return Err(DomainError::Duplicate(format!(
                "Stock entry for given product ID {} and inventory ID {} already exists",
                id.product_id, id.inventory_id
            )));
        }

        if !self.products.exists_by_id(id.product_id).await? {
            return Err(DomainError::InvalidReference(format!(
                "Product of ID {} does not exist",
                id.product_id
            )));
        }
        if !self.inventories.exists_by_id(id.inventory_id).await? {
            return Err(DomainError::InvalidReference(format!(
                "Inventory of ID {} does not exist",
                id.inventory_id
            )));
        }

        let entry = StockEntry { id, quantity };
        self.stock.save(&entry).await?;
        info!(
            product_id = id.product_id,
            inventory_id = id.inventory_id,
            quantity,
            "stock entry created"
        );
        Ok(entry)
    }

    /// Four-way dispatch: both filters select the single keyed entry (empty or
    /// singleton); one filter selects that side's entries; none selects all.
    pub async fn list(
        &self,
        product_id: Option<i64>,
        inventory_id: Option<i64>,
    ) -> Result<Vec<StockEntry>, DomainError> {
        match (product_id, inventory_id) {
            (Some(product_id), Some(inventory_id)) => {
                let id = StockEntryId::new(product_id, inventory_id);
                Ok(self.stock.find_by_id(id).await?.into_iter().collect())
            }
            (None, Some(inventory_id)) => self.stock.find_by_inventory(inventory_id).await,
            (Some(product_id), None) => self.stock.find_by_product(product_id).await,
            (None, None) => self.stock.find_all().await,
        }
    }

    /// Replace the quantity of an existing entry. The composite key addresses
    /// the entry and is never changed.
    pub async fn update(&self, request: &StockEntryRequest) -> Result<StockEntry, DomainError> {
        validate_stock_request(request)?;
        let (id, quantity) = Self::key_and_quantity(request);

        let mut entry = self.stock.find_by_id(id).await?.ok_or_else(|| {
            DomainError::NotFound(format!(
                "Stock entry for given product ID {} and inventory ID {} is not found",
                id.product_id, id.inventory_id
            ))
        })?;
        entry.quantity = quantity;
        self.stock.save(&entry).await?;
        info!(
            product_id = id.product_id,
            inventory_id = id.inventory_id,
            quantity,
            "stock entry updated"
        );
        Ok(entry)
    }

    // Validated requests always carry all three fields.
    fn key_and_quantity(request: &StockEntryRequest) -> (StockEntryId, i64) {
        (
            StockEntryId::new(
                request.product_id.unwrap_or_default(),
                request.inventory_id.unwrap_or_default(),
            ),
            request.quantity.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::memory_repo::MemoryStore;
    use crate::domain::{NameRequest, ProductRequest};
    use crate::usecases::category_service::CategoryService;
    use crate::usecases::inventory_service::InventoryService;
    use crate::usecases::product_service::ProductService;
    use crate::usecases::validation::{CompatibilityTable, ProductValidator};

    struct Fixture {
        stock: StockService,
        product_id: i64,
        inventory_id: i64,
    }

    /// One product ("Widget" under "Misc") and one inventory ("Main").
    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let categories = CategoryService::new(store.clone());
        let products = ProductService::new(
            ProductValidator::new(CompatibilityTable::standard()),
            store.clone(),
            store.clone(),
        );
        let inventories = InventoryService::new(store.clone());

        let category = categories.create(&NameRequest::new("Misc")).await.unwrap();
        let product = products
            .create(&ProductRequest::new("Widget", category.id))
            .await
            .unwrap();
        let inventory = inventories.create(&NameRequest::new("Main")).await.unwrap();

        Fixture {
            stock: StockService::new(store.clone(), store.clone(), store),
            product_id: product.id,
            inventory_id: inventory.id,
        }
    }

    #[tokio::test]
    async fn create_with_missing_references_fails_before_any_write() {
        let f = fixture().await;

        let err = f
            .stock
            .create(&StockEntryRequest::new(404, f.inventory_id, 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidReference(_)));

        let err = f
            .stock
            .create(&StockEntryRequest::new(f.product_id, 404, 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidReference(_)));

        assert!(f.stock.list(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_then_same_key_fails_duplicate() {
        let f = fixture().await;
        let request = StockEntryRequest::new(f.product_id, f.inventory_id, 100);

        let entry = f.stock.create(&request).await.unwrap();
        assert_eq!(entry.quantity, 100);

        let err = f.stock.create(&request).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(f.stock.list(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_accepts_zero_quantity_rejects_negative() {
        let f = fixture().await;

        let err = f
            .stock
            .create(&StockEntryRequest::new(f.product_id, f.inventory_id, -1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let entry = f
            .stock
            .create(&StockEntryRequest::new(f.product_id, f.inventory_id, 0))
            .await
            .unwrap();
        assert_eq!(entry.quantity, 0);
    }

    #[tokio::test]
    async fn list_dispatches_on_present_filters() {
        let f = fixture().await;
        f.stock
            .create(&StockEntryRequest::new(f.product_id, f.inventory_id, 5))
            .await
            .unwrap();

        // Both -> singleton by composite key; missing key -> empty.
        let both = f
            .stock
            .list(Some(f.product_id), Some(f.inventory_id))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert!(f.stock.list(Some(404), Some(404)).await.unwrap().is_empty());

        // One side only.
        assert_eq!(f.stock.list(Some(f.product_id), None).await.unwrap().len(), 1);
        assert_eq!(
            f.stock.list(None, Some(f.inventory_id)).await.unwrap().len(),
            1
        );
        assert!(f.stock.list(Some(404), None).await.unwrap().is_empty());

        // Neither -> everything.
        assert_eq!(f.stock.list(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_quantity_only() {
        let f = fixture().await;
        f.stock
            .create(&StockEntryRequest::new(f.product_id, f.inventory_id, 5))
            .await
            .unwrap();

        let updated = f
            .stock
            .update(&StockEntryRequest::new(f.product_id, f.inventory_id, 42))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 42);
        assert_eq!(updated.id, StockEntryId::new(f.product_id, f.inventory_id));

        let listed = f
            .stock
            .list(Some(f.product_id), Some(f.inventory_id))
            .await
            .unwrap();
        assert_eq!(listed[0].quantity, 42);
    }

    #[tokio::test]
    async fn update_missing_key_fails_not_found() {
        let f = fixture().await;
        let err = f
            .stock
            .update(&StockEntryRequest::new(f.product_id, f.inventory_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_malformed_request() {
        let f = fixture().await;
        let err = f
            .stock
            .update(&StockEntryRequest {
                product_id: Some(f.product_id),
                inventory_id: Some(f.inventory_id),
                quantity: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
