use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use env_logger::Env;
use log::info;

use posts_api::config::{AppConfig, StoreBackend};
use posts_api::database::{DocumentStore, InMemoryStore, MongoStore};
use posts_api::post::post_service::PostService;
use posts_api::router::index::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Mongo => {
            let mongo = MongoStore::init(&config.mongodb_uri, &config.mongodb_database)
                .await
                .map_err(|e| {
                    log::error!("Failed to connect to MongoDB: {}", e);
                    std::io::Error::other(e)
                })?;
            Arc::new(mongo)
        }
        StoreBackend::Memory => {
            info!("Using in-memory document store; data is lost on exit");
            Arc::new(InMemoryStore::new())
        }
    };

    let post_service = web::Data::new(PostService::new(store, config.posts_collection.clone()));

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(post_service.clone())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // Only reached once the server shuts down
    info!("Server has stopped");

    Ok(())
}
