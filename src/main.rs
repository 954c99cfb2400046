use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use attendance_tracker::config::Config;
use attendance_tracker::db::init_db;
use attendance_tracker::docs::ApiDoc;
use attendance_tracker::middleware;
use attendance_tracker::routes;
use attendance_tracker::store::{MemoryStore, MySqlStore, RecordStore};

#[get("/")]
async fn index() -> impl Responder {
    "Attendance tracker is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(url) => Arc::new(MySqlStore::new(init_db(url, config.db_max_connections).await?)),
        None => {
            warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    info!(backend = store.backend_tag(), "Record store ready");

    let store = Data::from(store);
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors(&config.cors_allowed_origins))
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
