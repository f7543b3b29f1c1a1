use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use sv_api::{create_app, AppState, HttpSettings, SessionTransport};
use sv_core::repositories::{SessionStore, UserRepository};
use sv_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, TokenIssuer, TokenIssuerConfig,
};
use sv_infra::database::{DatabasePool, MySqlSessionStore, MySqlUserRepository};
use sv_infra::{FsObjectStorage, InMemorySessionStore, InMemoryUserRepository};
use sv_shared::config::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Missing secrets or expiries stop the process before anything is served
    let config = AppConfig::from_env().context("failed to load configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!(
        "Starting StreamVault API Server ({} environment, {:?} backend)",
        config.environment, config.storage.backend
    );

    match config.storage.backend {
        StorageBackend::Memory => {
            let users = Arc::new(InMemoryUserRepository::new());
            let sessions = Arc::new(InMemorySessionStore::new());
            run_server(config, users, sessions).await
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to the database")?;
            pool.run_migrations()
                .await
                .context("failed to run database migrations")?;
            info!("Database ready: {}", pool.get_statistics());

            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let sessions = Arc::new(MySqlSessionStore::new(pool.get_pool().clone()));
            let result = run_server(config, users, sessions).await;
            pool.close().await;
            result
        }
    }
}

async fn run_server<U, S>(config: AppConfig, users: Arc<U>, sessions: Arc<S>) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let token_issuer = Arc::new(TokenIssuer::new(TokenIssuerConfig::from(&config.auth.jwt)));
    let password_hasher = Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost));
    let object_storage = Arc::new(FsObjectStorage::from_config(&config.storage));
    info!("Profile images stored under {}", object_storage.root().display());

    let auth_service = Arc::new(
        AuthService::new(
            users,
            sessions,
            token_issuer,
            password_hasher,
            AuthServiceConfig::from(&config.auth),
        )
        .with_object_storage(object_storage),
    );

    let app_state = web::Data::new(AppState {
        auth_service,
        transport: SessionTransport::new(config.auth.session.clone()),
        upload_temp_dir: PathBuf::from(&config.storage.temp_dir),
    });
    let settings = HttpSettings {
        environment: config.environment,
        cors_origins: config.server.cors_origins.clone(),
    };

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), settings.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
