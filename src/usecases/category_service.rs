//! Category CRUD: name validation + uniqueness over the category port.
//!
//! Uniqueness is check-then-act: the existence lookup and the write are two
//! separate port calls with no transaction held across them. Concurrent
//! creates with the same name can race; the SQLite schema's unique index is
//! the backstop.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Category, DomainError, NameRequest};
use crate::ports::CategoryRepo;
use crate::usecases::validation::validate_name;

pub struct CategoryService {
    repo: Arc<dyn CategoryRepo>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepo>) -> Self {
        Self { repo }
    }

    /// Create a category with a store-assigned id. Fails on a bad name or a
    /// name already taken (any case).
    pub async fn create(&self, request: &NameRequest) -> Result<Category, DomainError> {
        let name = validate_name(request.name.as_deref())?;

        if self.repo.exists_by_name(name).await? {
            return Err(DomainError::Duplicate(
                "Category with the same name already exists".into(),
            ));
        }

        let category = self.repo.create(name).await?;
        info!(id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// All categories, or only those whose name contains `name_filter`.
    /// An absent or empty filter means no filter.
    pub async fn list(&self, name_filter: Option<&str>) -> Result<Vec<Category>, DomainError> {
        match name_filter {
            Some(filter) if !filter.is_empty() => self.repo.find_by_name_like(filter).await,
            _ => self.repo.find_all().await,
        }
    }

    /// Lookup by id. Absence is an empty result, not an error; the caller
    /// decides whether that is a failure.
    pub async fn get(&self, id: i64) -> Result<Option<Category>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Replace the name of an existing category. Re-validated like create.
    pub async fn update(&self, id: i64, request: &NameRequest) -> Result<Category, DomainError> {
        let name = validate_name(request.name.as_deref())?;

        if self.repo.exists_by_name(name).await? {
            return Err(DomainError::Duplicate(
                "Category with the same name already exists".into(),
            ));
        }

        let mut category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Category not found".into()))?;
        category.name = name.to_string();
        self.repo.update(&category).await?;
        info!(id, name = %category.name, "category updated");
        Ok(category)
    }

    /// Remove a category. No cascade: products referencing it are untouched.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(DomainError::NotFound("Category not found".into()));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "category deleted");
        Ok(())
    }
}
