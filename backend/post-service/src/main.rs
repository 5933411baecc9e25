use actix_cors::Cors;
use actix_web::{http, web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use post_service::middleware::RequestLogMiddleware;
use post_service::{routes, Config};

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "post-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn build_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .max_age(3600);

    for origin in allowed_origins.split(',').map(str::trim) {
        if !origin.is_empty() {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("🔧 Starting post-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "✅ Configuration loaded: env={}, port={}",
        config.app.env, config.app.port
    );

    // Initialize JWT validation key (this service never mints tokens)
    auth_core::jwt::initialize_validation_key(&config.auth.public_key_pem)
        .context("Failed to initialize JWT validation key")?;
    info!("✅ JWT validation key initialized");

    // Initialize database pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("✅ Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("✅ Database migrations completed");

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    info!("🚀 post-service listening on http://{}", bind_addr);

    let allowed_origins = config.cors.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestLogMiddleware)
            .wrap(build_cors(&allowed_origins))
            .app_data(web::Data::new(pg_pool.clone()))
            .route("/health", web::get().to(health))
            .configure(routes::configure)
    })
    .bind(&bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("🛑 post-service shutting down");
    Ok(())
}
