//! Service entry point: load config, bind the store, serve.

use std::sync::Arc;

use anyhow::Context;

use product_service::config::Config;
use product_service::database;
use product_service::handlers;
use product_service::observability::init_tracing;
use product_service::repository::PostgresProductRepository;
use product_service::server::Server;
use product_service::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("product-service")?;
    init_tracing(&config)?;

    let database_config = config
        .database
        .clone()
        .context("a [database] section is required to start the service")?;

    let pool = database::create_pool(&database_config).await?;
    if database_config.run_migrations {
        database::run_migrations(&pool).await?;
    }

    let repository = Arc::new(PostgresProductRepository::new(pool));
    let state = AppState::new(config.clone(), repository);

    let app = handlers::router(state);
    Server::new(config).serve(app).await?;

    Ok(())
}
