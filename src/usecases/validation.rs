//! Input validation: name charset, category compatibility, stock request shape.
//!
//! Pure functions of their input; no port access. Services run these before any
//! store lookup or write.

use std::collections::{HashMap, HashSet};

use crate::domain::{Category, DomainError, ProductRequest, StockEntryRequest};

/// Validates a display name: non-empty, only `[A-Za-z0-9-_ ]`.
/// Returns the validated name so callers can use it without re-unwrapping.
pub fn validate_name(name: Option<&str>) -> Result<&str, DomainError> {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(DomainError::Validation("Name is empty".into())),
    };
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ');
    if !valid {
        return Err(DomainError::Validation(
            "Some characters in given name is invalid".into(),
        ));
    }
    Ok(name)
}

/// Immutable category -> allowed product names lookup. Keys and members are held
/// lowercase; categories absent from the table impose no restriction.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityTable {
    rules: HashMap<String, HashSet<String>>,
}

impl CompatibilityTable {
    /// Build a table from (category, allowed names) pairs. Everything is
    /// lowercased on the way in; lookups are case-insensitive.
    pub fn new<C, N, I, R>(rules: R) -> Self
    where
        C: AsRef<str>,
        N: AsRef<str>,
        I: IntoIterator<Item = N>,
        R: IntoIterator<Item = (C, I)>,
    {
        let rules = rules
            .into_iter()
            .map(|(category, names)| {
                let names = names
                    .into_iter()
                    .map(|n| n.as_ref().to_lowercase())
                    .collect();
                (category.as_ref().to_lowercase(), names)
            })
            .collect();
        Self { rules }
    }

    /// The fixed table shipped with the app.
    pub fn standard() -> Self {
        Self::new([
            ("clothes", vec!["dress", "shirt", "shoe", "skirt", "sock"]),
            ("food", vec!["bread", "cake", "macaroni", "pizza", "salad"]),
        ])
    }

    fn allowed(&self, category_name: &str) -> Option<&HashSet<String>> {
        self.rules.get(&category_name.to_lowercase())
    }
}

/// Product validator: name charset plus the category compatibility whitelist.
#[derive(Debug, Clone, Default)]
pub struct ProductValidator {
    table: CompatibilityTable,
}

impl ProductValidator {
    pub fn new(table: CompatibilityTable) -> Self {
        Self { table }
    }

    /// Validates the product name and, when the category is listed in the
    /// table, that the name is in the category's allowed set. Returns the
    /// validated name.
    pub fn validate<'a>(
        &self,
        request: &'a ProductRequest,
        category: Option<&Category>,
    ) -> Result<&'a str, DomainError> {
        let name = validate_name(request.name.as_deref())?;

        let category = category.ok_or_else(|| {
            DomainError::Validation("Category name is invalid".into())
        })?;

        if let Some(set) = self.table.allowed(&category.name) {
            if !set.contains(&name.to_lowercase()) {
                return Err(DomainError::Validation(format!(
                    "The product \"{}\" should not be in category \"{}\"",
                    name, category.name
                )));
            }
        }
        Ok(name)
    }
}

/// Validates a stock-change request: both ids present, quantity present and
/// non-negative. Zero is accepted.
pub fn validate_stock_request(request: &StockEntryRequest) -> Result<(), DomainError> {
    if request.inventory_id.is_none() {
        return Err(DomainError::Validation("Inventory ID is invalid".into()));
    }
    if request.product_id.is_none() {
        return Err(DomainError::Validation("Product ID is invalid".into()));
    }
    match request.quantity {
        Some(q) if q >= 0 => Ok(()),
        _ => Err(DomainError::Validation("Quantity is invalid".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn category(name: &str) -> Category {
        Category {
            id: 1,
            name: name.to_string(),
        }
    }

    #[test]
    fn accepts_names_within_charset() {
        for name in ["One", "a-b_c 9", "UPPER lower", "42", "-_ "] {
            assert!(validate_name(Some(name)).is_ok(), "rejected {:?}", name);
        }
    }

    #[test]
    fn rejects_absent_and_empty_names() {
        assert!(matches!(
            validate_name(None),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_name(Some("")),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rejects_names_with_invalid_characters() {
        for name in ["a/b", "semi;colon", "dot.", "ünïcode", "tab\there"] {
            assert!(
                matches!(validate_name(Some(name)), Err(DomainError::Validation(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn listed_category_rejects_names_outside_its_set() {
        let validator = ProductValidator::new(CompatibilityTable::standard());
        let request = ProductRequest::new("Cake", 1);
        let err = validator
            .validate(&request, Some(&category("Clothes")))
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("Cake"));
                assert!(msg.contains("Clothes"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn listed_category_accepts_names_in_its_set() {
        let validator = ProductValidator::new(CompatibilityTable::standard());
        let dress = ProductRequest::new("Dress", 1);
        assert!(validator.validate(&dress, Some(&category("Clothes"))).is_ok());
        let bread = ProductRequest::new("Bread", 1);
        assert!(validator.validate(&bread, Some(&category("Food"))).is_ok());
        let shoe = ProductRequest::new("Shoe", 1);
        assert!(validator.validate(&shoe, Some(&category("Food"))).is_err());
    }

    #[test]
    fn unlisted_category_is_unrestricted() {
        let validator = ProductValidator::new(CompatibilityTable::standard());
        let request = ProductRequest::new("Anything-At All", 1);
        assert!(
            validator
                .validate(&request, Some(&category("Electronics")))
                .is_ok()
        );
    }

    #[test]
    fn absent_category_fails_validation() {
        let validator = ProductValidator::new(CompatibilityTable::standard());
        let request = ProductRequest::new("Dress", 1);
        assert!(matches!(
            validator.validate(&request, None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn compatibility_lookup_ignores_case() {
        let validator = ProductValidator::new(CompatibilityTable::standard());
        let request = ProductRequest::new("DRESS", 1);
        assert!(validator.validate(&request, Some(&category("CLOTHES"))).is_ok());
    }

    #[test]
    fn stock_request_requires_both_ids_and_quantity() {
        let missing_inventory = StockEntryRequest {
            product_id: Some(1),
            inventory_id: None,
            quantity: Some(5),
        };
        assert!(validate_stock_request(&missing_inventory).is_err());

        let missing_product = StockEntryRequest {
            product_id: None,
            inventory_id: Some(1),
            quantity: Some(5),
        };
        assert!(validate_stock_request(&missing_product).is_err());

        let missing_quantity = StockEntryRequest {
            product_id: Some(1),
            inventory_id: Some(1),
            quantity: None,
        };
        assert!(validate_stock_request(&missing_quantity).is_err());
    }

    #[test]
    fn stock_request_rejects_negative_quantity_accepts_zero() {
        assert!(validate_stock_request(&StockEntryRequest::new(1, 1, -1)).is_err());
        assert!(validate_stock_request(&StockEntryRequest::new(1, 1, 0)).is_ok());
        assert!(validate_stock_request(&StockEntryRequest::new(1, 1, 100)).is_ok());
    }
}
