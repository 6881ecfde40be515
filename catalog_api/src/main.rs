mod commands;
mod config;
mod context;
mod endpoints;
mod error;
mod models;
mod queries;

use crate::config::Settings;
use crate::context::{MemoryDatabase, PgDatabase, RequestScope, SharedDatabase};
use actix_web::web::Data;
use actix_web::{middleware, App, HttpServer};
use anyhow::Context;
use mediator::DefaultMediator;
use std::sync::Arc;

pub type CatalogMediator = DefaultMediator<RequestScope>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env();
    let database = create_database(&settings).await?;
    let mediator = create_mediator();
    let environment = settings.environment;

    log::info!(
        "Listening on {}:{} ({:?}, {} request handlers)",
        settings.host,
        settings.port,
        environment,
        mediator.len()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .app_data(Data::new(mediator.clone()))
            .app_data(Data::new(database.clone()))
            .configure(|cfg| endpoints::configure(cfg, environment))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}

fn create_mediator() -> CatalogMediator {
    use commands::*;
    use queries::*;

    CatalogMediator::builder()
        // Commands
        .add_handler(CreateProductCommandHandler)
        .add_handler(UpdateProductCommandHandler)
        .add_handler(DeleteProductByIdCommandHandler)
        // Queries
        .add_handler(GetAllProductsQueryHandler)
        .add_handler(GetProductByIdQueryHandler)
        .build()
}

async fn create_database(settings: &Settings) -> anyhow::Result<SharedDatabase> {
    match settings.database_url.as_deref() {
        Some(url) => {
            let database = PgDatabase::connect(url, settings.max_connections)
                .await
                .context("Failed to connect to the database")?;

            database
                .ensure_schema()
                .await
                .context("Failed to create the products table")?;

            log::info!("Products are stored in PostgreSQL");
            Ok(Arc::new(database))
        }
        None => {
            log::warn!("DATABASE_URL is not set, products are kept in memory");
            Ok(Arc::new(MemoryDatabase::new()))
        }
    }
}
