use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use swamp_study::config::{LoggingSettings, Settings, StorageBackend};
use swamp_study::error::{handle_json_payload_error, handle_query_payload_error};
use swamp_study::routes::{self, AppState};
use swamp_study::services::{MemoryStore, PostgresStore, Store};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

async fn build_store(settings: &Settings) -> io::Result<Arc<dyn Store>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let store = PostgresStore::from_settings(&settings.storage)
                .await
                .map_err(|e| {
                    error!("Failed to connect to PostgreSQL: {}", e);
                    io::Error::new(io::ErrorKind::Other, e.to_string())
                })?;
            info!(
                "PostgreSQL store initialized (max: {} connections)",
                settings.storage.max_connections
            );
            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Swamp Study service...");

    let store = build_store(&settings).await?;
    let app_state = AppState::new(store, &settings);

    if !settings.admin.usernames.is_empty() {
        info!("{} configured admin usernames", settings.admin.usernames.len());
    }

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    let server = match settings.server.workers {
        Some(workers) => server.workers(workers),
        None => server,
    };

    server.bind((host, port))?.run().await
}
