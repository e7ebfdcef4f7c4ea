//! Inventory CRUD. Same shape as the category service over its own port.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, Inventory, NameRequest};
use crate::ports::InventoryRepo;
use crate::usecases::validation::validate_name;

pub struct InventoryService {
    repo: Arc<dyn InventoryRepo>,
}

impl InventoryService {
    pub fn new(repo: Arc<dyn InventoryRepo>) -> Self {
        Self { repo }
    }

    /// Create an inventory with a store-assigned id. Fails on a bad name or a
    /// name already taken (any case).
    pub async fn create(&self, request: &NameRequest) -> Result<Inventory, DomainError> {
        let name = validate_name(request.name.as_deref())?;

        if self.repo.exists_by_name(name).await? {
            return Err(DomainError::Duplicate(
                "Inventory with the same name already exists".into(),
            ));
        }

        let inventory = self.repo.create(name).await?;
        info!(id = inventory.id, name = %inventory.name, "inventory created");
        Ok(inventory)
    }

    /// All inventories, or only those whose name contains `name_filter`.
    pub async fn list(&self, name_filter: Option<&str>) -> Result<Vec<Inventory>, DomainError> {
        match name_filter {
            Some(filter) if !filter.is_empty() => self.repo.find_by_name_like(filter).await,
            _ => self.repo.find_all().await,
        }
    }

    /// Lookup by id. Absence is an empty result, not an error.
    pub async fn get(&self, id: i64) -> Result<Option<Inventory>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Replace the name of an existing inventory. Re-validated like create.
    pub async fn update(&self, id: i64, request: &NameRequest) -> Result<Inventory, DomainError> {
        let name = validate_name(request.name.as_deref())?;

        if self.repo.exists_by_name(name).await? {
            return Err(DomainError::Duplicate(
                "Inventory with the same name already exists".into(),
            ));
        }

        let mut inventory = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Inventory not found".into()))?;
        inventory.name = name.to_string();
        self.repo.update(&inventory).await?;
        info!(id, name = %inventory.name, "inventory updated");
        Ok(inventory)
    }

    /// Remove an inventory. No cascade: stock entries referencing it remain.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(DomainError::NotFound("Inventory not found".into()));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "inventory deleted");
        Ok(())
    }
}
