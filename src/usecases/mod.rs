//! Application use cases. All decision logic lives here: validators plus the
//! four store services, orchestrating domain rules via the persistence ports.
//!
//! Every uniqueness/reference check and the following write are separate port
//! calls; nothing here holds a transaction across them (see the schema-level
//! constraints in the SQLite adapter for the backstop).

pub mod category_service;
pub mod inventory_service;
pub mod product_service;
pub mod stock_service;
pub mod validation;

pub use category_service::CategoryService;
pub use inventory_service::InventoryService;
pub use product_service::ProductService;
pub use stock_service::StockService;
pub use validation::{CompatibilityTable, ProductValidator};
