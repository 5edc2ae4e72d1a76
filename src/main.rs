use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use clinicdesk_api::config::ApiConfig;
use clinicdesk_db::{create_pool_with, schema::initialize_database, store::PgScheduleStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize logging
    clinicdesk_api::init_tracing(config.log_level)?;
    info!("Starting Clinicdesk API");

    // Create database connection pool
    let db_pool = create_pool_with(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    let store = Arc::new(PgScheduleStore::new(db_pool));
    clinicdesk_api::start_server(config, store).await?;

    Ok(())
}
