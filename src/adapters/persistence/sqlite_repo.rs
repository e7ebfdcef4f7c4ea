//! SQLite-backed store via libsql. Implements all four repo ports.
//!
//! One database file (stockroom.db) in the given base directory. Name columns
//! carry COLLATE NOCASE with a UNIQUE index, and stock entries use the
//! composite primary key, so the storage layer backstops the service-level
//! check-then-act uniqueness checks.

use libsql::{params, Database, Row};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::{Category, DomainError, Inventory, Product, StockEntry, StockEntryId};
use crate::ports::{CategoryRepo, InventoryRepo, ProductRepo, StockRepo};

const CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
)"#;

const INVENTORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS inventories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
)"#;

const PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
)"#;

const STOCK_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stock_entries (
    product_id INTEGER NOT NULL,
    inventory_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    PRIMARY KEY (product_id, inventory_id)
)"#;

/// SQLite store. Connect once at startup; the returned store is safe to share
/// via Arc across all four services.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Connect to (or create) the database and ensure the schema exists.
    /// WAL mode enables concurrent readers + one writer; synchronous=NORMAL is
    /// safe with WAL.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Repo(e.to_string()))?;
        let db_path: PathBuf = base.join("stockroom.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Repo(e.to_string()))?;

        // PRAGMA returns a row (the new value); use query and drain the rows
        // (execute fails when rows are returned).
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn
                .query(pragma, ())
                .await
                .map_err(|e| DomainError::Repo(format!("{} failed: {}", pragma, e)))?;
            while rows
                .next()
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?
                .is_some()
            {}
        }

        for table in [
            CATEGORIES_TABLE,
            INVENTORIES_TABLE,
            PRODUCTS_TABLE,
            STOCK_TABLE,
        ] {
            conn.execute(table, ())
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?;
        }

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db })
    }

    fn conn(&self) -> Result<libsql::Connection, DomainError> {
        self.db.connect().map_err(|e| DomainError::Repo(e.to_string()))
    }

    /// True if the query yields at least one row.
    async fn exists(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<bool, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .is_some())
    }

    async fn collect<T>(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        map: fn(&Row) -> Result<T, DomainError>,
    ) -> Result<Vec<T>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            out.push(map(&row)?);
        }
        Ok(out)
    }

    async fn fetch_one<T>(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        map: fn(&Row) -> Result<T, DomainError>,
    ) -> Result<Option<T>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        match rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            Some(row) => Ok(Some(map(&row)?)),
            None => Ok(None),
        }
    }
}

fn category_row(row: &Row) -> Result<Category, DomainError> {
    Ok(Category {
        id: row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
        name: row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?,
    })
}

fn inventory_row(row: &Row) -> Result<Inventory, DomainError> {
    Ok(Inventory {
        id: row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
        name: row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?,
    })
}

fn product_row(row: &Row) -> Result<Product, DomainError> {
    Ok(Product {
        id: row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
        category_id: row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?,
        name: row.get(2).map_err(|e| DomainError::Repo(e.to_string()))?,
    })
}

fn stock_row(row: &Row) -> Result<StockEntry, DomainError> {
    Ok(StockEntry {
        id: StockEntryId {
            product_id: row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?,
            inventory_id: row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?,
        },
        quantity: row.get(2).map_err(|e| DomainError::Repo(e.to_string()))?,
    })
}

#[async_trait::async_trait]
impl CategoryRepo for SqliteStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        self.exists(
            "SELECT 1 FROM categories WHERE name = ?1 LIMIT 1",
            params![name],
        )
        .await
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Category>, DomainError> {
        self.collect(
            "SELECT id, name FROM categories WHERE name LIKE '%' || ?1 || '%' ORDER BY id",
            params![pattern],
            category_row,
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        self.collect(
            "SELECT id, name FROM categories ORDER BY id",
            (),
            category_row,
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        self.fetch_one(
            "SELECT id, name FROM categories WHERE id = ?1",
            params![id],
            category_row,
        )
        .await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        self.exists(
            "SELECT 1 FROM categories WHERE id = ?1 LIMIT 1",
            params![id],
        )
        .await
    }

    async fn create(&self, name: &str) -> Result<Category, DomainError> {
        self.fetch_one(
            "INSERT INTO categories (name) VALUES (?1) RETURNING id, name",
            params![name],
            category_row,
        )
        .await?
        .ok_or_else(|| DomainError::Repo("insert returned no row".into()))
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let affected = conn
            .execute(
                "UPDATE categories SET name = ?2 WHERE id = ?1",
                params![category.id, category.name.as_str()],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        if affected == 0 {
            return Err(DomainError::Repo(format!(
                "no category row with id {}",
                category.id
            )));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM categories WHERE id = ?1", params![id])
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryRepo for SqliteStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        self.exists(
            "SELECT 1 FROM inventories WHERE name = ?1 LIMIT 1",
            params![name],
        )
        .await
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Inventory>, DomainError> {
        self.collect(
            "SELECT id, name FROM inventories WHERE name LIKE '%' || ?1 || '%' ORDER BY id",
            params![pattern],
            inventory_row,
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Inventory>, DomainError> {
        self.collect(
            "SELECT id, name FROM inventories ORDER BY id",
            (),
            inventory_row,
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, DomainError> {
        self.fetch_one(
            "SELECT id, name FROM inventories WHERE id = ?1",
            params![id],
            inventory_row,
        )
        .await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        self.exists(
            "SELECT 1 FROM inventories WHERE id = ?1 LIMIT 1",
            params![id],
        )
        .await
    }

    async fn create(&self, name: &str) -> Result<Inventory, DomainError> {
        self.fetch_one(
            "INSERT INTO inventories (name) VALUES (?1) RETURNING id, name",
            params![name],
            inventory_row,
        )
        .await?
        .ok_or_else(|| DomainError::Repo("insert returned no row".into()))
    }

    async fn update(&self, inventory: &Inventory) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let affected = conn
            .execute(
                "UPDATE inventories SET name = ?2 WHERE id = ?1",
                params![inventory.id, inventory.name.as_str()],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        if affected == 0 {
            return Err(DomainError::Repo(format!(
                "no inventory row with id {}",
                inventory.id
            )));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM inventories WHERE id = ?1", params![id])
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductRepo for SqliteStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        self.exists(
            "SELECT 1 FROM products WHERE name = ?1 LIMIT 1",
            params![name],
        )
        .await
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Product>, DomainError> {
        self.collect(
            "SELECT id, category_id, name FROM products WHERE name LIKE '%' || ?1 || '%' ORDER BY id",
            params![pattern],
            product_row,
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        self.collect(
            "SELECT id, category_id, name FROM products ORDER BY id",
            (),
            product_row,
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        self.fetch_one(
            "SELECT id, category_id, name FROM products WHERE id = ?1",
            params![id],
            product_row,
        )
        .await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DomainError> {
        self.exists("SELECT 1 FROM products WHERE id = ?1 LIMIT 1", params![id])
            .await
    }

    async fn create(&self, category_id: i64, name: &str) -> Result<Product, DomainError> {
        self.fetch_one(
            "INSERT INTO products (category_id, name) VALUES (?1, ?2) RETURNING id, category_id, name",
            params![category_id, name],
            product_row,
        )
        .await?
        .ok_or_else(|| DomainError::Repo("insert returned no row".into()))
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let affected = conn
            .execute(
                "UPDATE products SET category_id = ?2, name = ?3 WHERE id = ?1",
                params![product.id, product.category_id, product.name.as_str()],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        if affected == 0 {
            return Err(DomainError::Repo(format!(
                "no product row with id {}",
                product.id
            )));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM products WHERE id = ?1", params![id])
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl StockRepo for SqliteStore {
    async fn exists_by_id(&self, id: StockEntryId) -> Result<bool, DomainError> {
        self.exists(
            "SELECT 1 FROM stock_entries WHERE product_id = ?1 AND inventory_id = ?2 LIMIT 1",
            params![id.product_id, id.inventory_id],
        )
        .await
    }

    async fn find_by_id(&self, id: StockEntryId) -> Result<Option<StockEntry>, DomainError> {
        self.fetch_one(
            "SELECT product_id, inventory_id, quantity FROM stock_entries \
             WHERE product_id = ?1 AND inventory_id = ?2",
            params![id.product_id, id.inventory_id],
            stock_row,
        )
        .await
    }

    async fn find_by_product(&self, product_id: i64) -> Result<Vec<StockEntry>, DomainError> {
        self.collect(
            "SELECT product_id, inventory_id, quantity FROM stock_entries \
             WHERE product_id = ?1 ORDER BY inventory_id",
            params![product_id],
            stock_row,
        )
        .await
    }

    async fn find_by_inventory(&self, inventory_id: i64) -> Result<Vec<StockEntry>, DomainError> {
        self.collect(
            "SELECT product_id, inventory_id, quantity FROM stock_entries \
             WHERE inventory_id = ?1 ORDER BY product_id",
            params![inventory_id],
            stock_row,
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<StockEntry>, DomainError> {
        self.collect(
            "SELECT product_id, inventory_id, quantity FROM stock_entries \
             ORDER BY product_id, inventory_id",
            (),
            stock_row,
        )
        .await
    }

    async fn save(&self, entry: &StockEntry) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO stock_entries (product_id, inventory_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (product_id, inventory_id) DO UPDATE SET
                quantity = excluded.quantity
            "#,
            params![entry.id.product_id, entry.id.inventory_id, entry.quantity],
        )
        .await
        .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }
}
