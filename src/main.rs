mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, StorageKind};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{routes as auth_routes, AuthService, SessionStore};
use crate::features::categories::routes as categories_routes;
use crate::features::data_files::{routes as data_files_routes, DataFileService};
use crate::features::database::{routes as database_routes, DataStores, DatabaseService, Seeder};
use crate::features::gallery::{routes as gallery_routes, GalleryService};
use crate::features::messages::{routes as messages_routes, MessageService};
use crate::features::services::{routes as services_routes, ServiceCatalogService};
use crate::features::site::{routes as site_routes, SiteService};
use crate::features::tips::{routes as tips_routes, TipService};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::storage::{JsonFileStorage, MemoryStorage, SqliteStorage, StorageBackend};
use crate::shared::templates::TemplateEngine;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Open the configured storage backend
async fn create_backend(config: &Config) -> anyhow::Result<Arc<dyn StorageBackend>> {
    let backend: Arc<dyn StorageBackend> = match config.storage.backend {
        StorageKind::Sqlite => {
            if let Some(dir) = sqlite_parent_dir(&config.database.url) {
                std::fs::create_dir_all(dir)?;
            }
            let pool = database::create_pool(&config.database).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Arc::new(SqliteStorage::new(pool))
        }
        StorageKind::Json => {
            let storage = JsonFileStorage::new(config.storage.data_dir.clone());
            tracing::info!(
                "Storing collections as JSON files in {}",
                storage.dir().display()
            );
            Arc::new(storage)
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryStorage::new())
        }
    };
    Ok(backend)
}

/// Directory part of a `sqlite://path/to/file.db?...` URL
fn sqlite_parent_dir(url: &str) -> Option<&std::path::Path> {
    let path = url.strip_prefix("sqlite://")?.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Storage
    let backend = create_backend(&config).await?;
    let stores = DataStores::new(Arc::clone(&backend));
    tracing::info!("Storage backend '{}' initialized", backend.name());

    // Sessions and users
    let sessions = Arc::new(SessionStore::new(config.auth.session_timeout));
    let user_service = Arc::new(UserService::new(
        stores.users.clone(),
        Arc::clone(&sessions),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_service),
        Arc::clone(&sessions),
    ));
    tracing::info!("Auth service initialized");

    // Database tools; seed collections that were never written
    let database_service = Arc::new(DatabaseService::new(
        stores.clone(),
        Seeder::new(config.storage.fixtures_dir.clone()),
        Arc::clone(&sessions),
    ));
    let seeded = database_service
        .seed()
        .await
        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;
    if !seeded.seeded.is_empty() {
        tracing::info!("Seeded collections: {}", seeded.seeded.join(", "));
    }

    // Catalogs
    let service_catalog = Arc::new(ServiceCatalogService::new(
        stores.services.clone(),
        stores.service_categories.clone(),
    ));
    let tip_service = Arc::new(TipService::new(
        stores.tips.clone(),
        stores.tip_categories.clone(),
    ));
    let gallery_service = Arc::new(GalleryService::new(
        stores.gallery.clone(),
        stores.gallery_categories.clone(),
    ));
    let message_service = Arc::new(MessageService::new(stores.messages.clone()));
    tracing::info!("Catalog services initialized");

    // Public site
    let templates = Arc::new(TemplateEngine::load(&config.app.templates_dir));
    let site_service = Arc::new(SiteService::new(
        templates,
        Arc::clone(&service_catalog),
        Arc::clone(&tip_service),
        Arc::clone(&gallery_service),
        Arc::clone(&message_service),
    ));
    let data_file_service = Arc::new(DataFileService::new(config.storage.fixtures_dir.clone()));
    tracing::info!(
        "Site renderer initialized, data files served from {}",
        data_file_service.dir().display()
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a session token)
    let mut protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(users_routes::routes(user_service))
        .merge(services_routes::admin_routes(Arc::clone(&service_catalog)))
        .merge(tips_routes::admin_routes(Arc::clone(&tip_service)))
        .merge(gallery_routes::admin_routes(Arc::clone(&gallery_service)))
        .merge(messages_routes::routes(message_service))
        .merge(database_routes::routes(database_service));
    for categories in stores.categories() {
        protected_routes =
            protected_routes.merge(categories_routes::routes(Arc::clone(categories)));
    }
    let protected_routes = protected_routes
        .merge(data_files_routes::write_routes(Arc::clone(&data_file_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&sessions),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(services_routes::public_routes(service_catalog))
        .merge(tips_routes::public_routes(tip_service))
        .merge(gallery_routes::public_routes(gallery_service))
        .merge(data_files_routes::read_routes(data_file_service))
        .merge(site_routes::routes(site_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(RequestBodyLimitLayer::new(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
