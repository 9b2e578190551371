use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blog::{
    AppState,
    config::{AppConfig, StoreBackend},
    create_router,
    jwt::{JwtConfig, JwtService},
    repositories::{BlogRepository, MemoryBlogRepository, PgBlogRepository, StaticUserDirectory},
    uploads::ImageStore,
};
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog=info,tower_http=info")),
        )
        .init();

    info!("Starting blog service");

    let config = AppConfig::from_env()?;

    let blog_repository: Arc<dyn BlogRepository> = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            let repository = PgBlogRepository::new(pool);
            repository.migrate().await?;
            Arc::new(repository)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory blog store, posts are lost on restart");
            Arc::new(MemoryBlogRepository::new())
        }
    };

    let user_directory = match &config.users_file {
        Some(path) => StaticUserDirectory::from_file(path)?,
        None => {
            warn!("USERS_FILE not set, every login will be rejected");
            StaticUserDirectory::default()
        }
    };

    let jwt_service = JwtService::new(&JwtConfig::from_env());

    tokio::fs::create_dir_all(&config.public_dir).await?;
    let image_store = ImageStore::new(config.public_dir.clone(), config.public_base_url.clone());

    let app_state = AppState {
        blog_repository,
        user_directory: Arc::new(user_directory),
        jwt_service,
        image_store,
    };

    info!("Blog service initialized successfully");

    let app = create_router(app_state, config.upload_max_bytes);

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Blog service listening on {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Blog service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
