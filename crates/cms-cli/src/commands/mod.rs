pub mod actions;
pub mod assets;
pub mod menu_items;

use anyhow::Context;
use cms_core::config::AppConfig;
use cms_db::{Database, DatabaseConfig};

async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    let db_config = DatabaseConfig::from(&config.database);
    Database::connect(&db_config)
        .await
        .context("failed to connect to DATABASE_URL")
}
