//! Product CRUD: category resolution, compatibility validation, name uniqueness.
//!
//! Update stages the new name and category first and validates compatibility
//! against the staged values, so validation always sees what would be
//! persisted, never the pre-update row.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, Product, ProductRequest};
use crate::ports::{CategoryRepo, ProductRepo};
use crate::usecases::validation::ProductValidator;

pub struct ProductService {
    validator: ProductValidator,
    products: Arc<dyn ProductRepo>,
    categories: Arc<dyn CategoryRepo>,
}

impl ProductService {
    pub fn new(
        validator: ProductValidator,
        products: Arc<dyn ProductRepo>,
        categories: Arc<dyn CategoryRepo>,
    ) -> Self {
        Self {
            validator,
            products,
            categories,
        }
    }

    /// Create a product under an existing category. The category is resolved
    /// first, then the name is validated against it, then uniqueness.
    pub async fn create(&self, request: &ProductRequest) -> Result<Product, DomainError> {
        let category_id = request
            .category_id
            .ok_or_else(|| DomainError::Validation("Category ID is invalid".into()))?;
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Given category does not exist".into()))?;

        let name = self.validator.validate(request, Some(&category))?;

        if self.products.exists_by_name(name).await? {
            return Err(DomainError::Duplicate(
                "Product with the same name already exists".into(),
            ));
        }

        let product = self.products.create(category.id, name).await?;
        info!(
            id = product.id,
            name = %product.name,
            category_id = product.category_id,
            "product created"
        );
        Ok(product)
    }

    /// All products, or only those whose name contains `name_filter`.
    pub async fn list(&self, name_filter: Option<&str>) -> Result<Vec<Product>, DomainError> {
        match name_filter {
            Some(filter) if !filter.is_empty() => self.products.find_by_name_like(filter).await,
            _ => self.products.find_all().await,
        }
    }

    /// Lookup by id. Absence is an empty result, not an error.
    pub async fn get(&self, id: i64) -> Result<Option<Product>, DomainError> {
        self.products.find_by_id(id).await
    }

    /// Update name and/or category of an existing product.
    ///
    /// Name uniqueness is only re-checked when the name actually changes. A
    /// changed category id is resolved (not-found when missing); an unchanged
    /// one loads the currently associated category. Compatibility runs last,
    /// against the staged name and the resolved category.
    pub async fn update(&self, id: i64, request: &ProductRequest) -> Result<Product, DomainError> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Product not found".into()))?;

        if let Some(new_name) = request.name.as_deref() {
            if new_name != product.name {
                if self.products.exists_by_name(new_name).await? {
                    return Err(DomainError::Duplicate(
                        "Product with the same name already exists".into(),
                    ));
                }
                product.name = new_name.to_string();
            }
        }

        let category_id = request
            .category_id
            .ok_or_else(|| DomainError::Validation("Category ID is invalid".into()))?;
        let category = if category_id != product.category_id {
            let category = self
                .categories
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| DomainError::NotFound("Given category does not exist".into()))?;
            product.category_id = category.id;
            Some(category)
        } else {
            // Unchanged: the associated category is loaded for validation only.
            // A dangling reference surfaces as a validation failure.
            self.categories.find_by_id(product.category_id).await?
        };

        self.validator.validate(request, category.as_ref())?;

        self.products.update(&product).await?;
        info!(
            id,
            name = %product.name,
            category_id = product.category_id,
            "product updated"
        );
        Ok(product)
    }

    /// Remove a product. No cascade: stock entries referencing it remain.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.products.exists_by_id(id).await? {
            return Err(DomainError::NotFound("Product not found".into()));
        }
        self.products.delete_by_id(id).await?;
        info!(id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::memory_repo::MemoryStore;
    use crate::domain::NameRequest;
    use crate::usecases::category_service::CategoryService;
    use crate::usecases::validation::CompatibilityTable;

    struct Fixture {
        products: ProductService,
        categories: CategoryService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let products = ProductService::new(
            ProductValidator::new(CompatibilityTable::standard()),
            store.clone(),
            store.clone(),
        );
        let categories = CategoryService::new(store);
        Fixture {
            products,
            categories,
        }
    }

    async fn category(fixture: &Fixture, name: &str) -> i64 {
        fixture
            .categories
            .create(&NameRequest::new(name))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_under_missing_category_fails_not_found() {
        let f = fixture();
        let err = f
            .products
            .create(&ProductRequest::new("Dress", 404))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_enforces_compatibility_whitelist() {
        let f = fixture();
        let clothes = category(&f, "Clothes").await;

        let err = f
            .products
            .create(&ProductRequest::new("Cake", clothes))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let dress = f
            .products
            .create(&ProductRequest::new("Dress", clothes))
            .await
            .unwrap();
        assert_eq!(dress.category_id, clothes);
    }

    #[tokio::test]
    async fn create_in_unlisted_category_is_unrestricted() {
        let f = fixture();
        let electronics = category(&f, "Electronics").await;
        let product = f
            .products
            .create(&ProductRequest::new("Telephone", electronics))
            .await
            .unwrap();
        assert_eq!(product.name, "Telephone");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_product_name() {
        let f = fixture();
        let food = category(&f, "Food").await;
        f.products
            .create(&ProductRequest::new("Bread", food))
            .await
            .unwrap();

        let err = f
            .products
            .create(&ProductRequest::new("bread", food))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(f.products.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_filters_by_substring() {
        let f = fixture();
        let misc = category(&f, "Misc").await;
        f.products
            .create(&ProductRequest::new("Hammer", misc))
            .await
            .unwrap();
        f.products
            .create(&ProductRequest::new("Handsaw", misc))
            .await
            .unwrap();
        f.products
            .create(&ProductRequest::new("Wrench", misc))
            .await
            .unwrap();

        assert_eq!(f.products.list(None).await.unwrap().len(), 3);
        assert_eq!(f.products.list(Some("Ha")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_missing_product_fails_not_found() {
        let f = fixture();
        let misc = category(&f, "Misc").await;
        let err = f
            .products
            .update(404, &ProductRequest::new("Name", misc))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_category_only_validates_against_new_category() {
        let f = fixture();
        let electronics = category(&f, "Electronics").await;
        let clothes = category(&f, "Clothes").await;
        let product = f
            .products
            .create(&ProductRequest::new("Telephone", electronics))
            .await
            .unwrap();

        // "Telephone" is not in the clothes whitelist; moving it there must
        // fail even though the name itself never changed.
        let err = f
            .products
            .update(product.id, &ProductRequest::new("Telephone", clothes))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // The product is unchanged.
        let stored = f.products.get(product.id).await.unwrap().unwrap();
        assert_eq!(stored.category_id, electronics);
    }

    #[tokio::test]
    async fn update_with_unchanged_name_skips_uniqueness_check() {
        let f = fixture();
        let misc = category(&f, "Misc").await;
        let other = category(&f, "Other").await;
        let product = f
            .products
            .create(&ProductRequest::new("Keeper", misc))
            .await
            .unwrap();

        // "Keeper" already exists (it is this very product); the update still
        // succeeds because an unchanged name is not re-checked.
        let updated = f
            .products
            .update(product.id, &ProductRequest::new("Keeper", other))
            .await
            .unwrap();
        assert_eq!(updated.name, "Keeper");
        assert_eq!(updated.category_id, other);
    }

    #[tokio::test]
    async fn update_to_taken_name_fails_duplicate() {
        let f = fixture();
        let misc = category(&f, "Misc").await;
        f.products
            .create(&ProductRequest::new("First", misc))
            .await
            .unwrap();
        let second = f
            .products
            .create(&ProductRequest::new("Second", misc))
            .await
            .unwrap();

        let err = f
            .products
            .update(second.id, &ProductRequest::new("First", misc))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_to_missing_category_fails_not_found() {
        let f = fixture();
        let misc = category(&f, "Misc").await;
        let product = f
            .products
            .create(&ProductRequest::new("Thing", misc))
            .await
            .unwrap();

        let err = f
            .products
            .update(product.id, &ProductRequest::new("Thing", 404))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_renames_within_whitelisted_category() {
        let f = fixture();
        let food = category(&f, "Food").await;
        let product = f
            .products
            .create(&ProductRequest::new("Bread", food))
            .await
            .unwrap();

        let updated = f
            .products
            .update(product.id, &ProductRequest::new("Cake", food))
            .await
            .unwrap();
        assert_eq!(updated.name, "Cake");

        let err = f
            .products
            .update(product.id, &ProductRequest::new("Dress", food))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_missing_product_fails_not_found() {
        let f = fixture();
        let err = f.products.delete(404).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_product() {
        let f = fixture();
        let misc = category(&f, "Misc").await;
        let product = f
            .products
            .create(&ProductRequest::new("Ephemeral", misc))
            .await
            .unwrap();
        f.products.delete(product.id).await.unwrap();
        assert!(f.products.get(product.id).await.unwrap().is_none());
    }
}
