//! Wiring & DI. Entry point: bootstrap the store, inject into services, report.
//! No business logic here; the transport collaborator drives the services.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stockroom::adapters::persistence::{MemoryStore, SqliteStore};
use stockroom::ports::{CategoryRepo, InventoryRepo, ProductRepo, StockRepo};
use stockroom::usecases::{
    CategoryService, CompatibilityTable, InventoryService, ProductService, ProductValidator,
    StockService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = stockroom::shared::config::AppConfig::load().unwrap_or_default();

    // --- Store: one backend shared by all four repos ---
    let (categories_repo, inventories_repo, products_repo, stock_repo): (
        Arc<dyn CategoryRepo>,
        Arc<dyn InventoryRepo>,
        Arc<dyn ProductRepo>,
        Arc<dyn StockRepo>,
    ) = if cfg.is_ephemeral() {
        info!("STOCKROOM_EPHEMERAL set, using in-memory store");
        let store = Arc::new(MemoryStore::new());
        (store.clone(), store.clone(), store.clone(), store)
    } else {
        let data_dir = cfg.data_dir_or_default();
        info!(data_dir = %data_dir, "using SQLite store");
        let store = Arc::new(
            SqliteStore::connect(&data_dir)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        );
        (store.clone(), store.clone(), store.clone(), store)
    };

    // --- Services ---
    let categories = CategoryService::new(Arc::clone(&categories_repo));
    let inventories = InventoryService::new(Arc::clone(&inventories_repo));
    let products = ProductService::new(
        ProductValidator::new(CompatibilityTable::standard()),
        Arc::clone(&products_repo),
        Arc::clone(&categories_repo),
    );
    let stock = StockService::new(
        Arc::clone(&stock_repo),
        Arc::clone(&products_repo),
        Arc::clone(&inventories_repo),
    );

    // --- Startup report ---
    let category_count = categories.list(None).await.map_err(|e| anyhow::anyhow!("{}", e))?.len();
    let inventory_count = inventories.list(None).await.map_err(|e| anyhow::anyhow!("{}", e))?.len();
    let product_count = products.list(None).await.map_err(|e| anyhow::anyhow!("{}", e))?.len();
    let stock_count = stock.list(None, None).await.map_err(|e| anyhow::anyhow!("{}", e))?.len();
    info!(
        categories = category_count,
        inventories = inventory_count,
        products = product_count,
        stock_entries = stock_count,
        "stockroom core ready"
    );

    Ok(())
}
