use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use thingbox::application::{
    ports::{
        security::{CredentialHasher, TokenIssuer},
        session::SessionStore,
        time::Clock,
    },
    services::ApplicationServices,
};
use thingbox::config::AppConfig;
use thingbox::domain::{thing::ThingRepository, user::UserRepository};
use thingbox::infrastructure::{
    database,
    repositories::{InMemoryStore, PostgresThingRepository, PostgresUserRepository},
    security::{
        password::Argon2CredentialHasher,
        session_store::AccountSessionStore,
        token::{JwtTokenIssuer, SigningConfig},
    },
    time::SystemClock,
};
use thingbox::presentation::http::{routes::build_router, state::HttpState};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn open_repositories(
    config: &AppConfig,
) -> Result<(Arc<dyn UserRepository>, Arc<dyn ThingRepository>)> {
    if let Some(url) = config.database_url() {
        let pool = database::init_pool(url).await?;
        database::run_migrations(&pool).await?;
        tracing::info!("using postgres store");
        return Ok((
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresThingRepository::new(pool)),
        ));
    }

    tracing::warn!("DATABASE_URL not set; data lives in memory and is lost on exit");
    let store = Arc::new(InMemoryStore::new());
    let user_repo: Arc<dyn UserRepository> = store.clone();
    let thing_repo: Arc<dyn ThingRepository> = store;
    Ok((user_repo, thing_repo))
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let (user_repo, thing_repo) = open_repositories(&config).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher::default());
    let token_issuer: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        SigningConfig {
            access_secret: config.access_secret().to_owned(),
            access_ttl: config.access_ttl(),
            refresh_secret: config.refresh_secret().to_owned(),
            refresh_ttl: config.refresh_ttl(),
        },
        Arc::clone(&clock),
    )?);
    let session_store: Arc<dyn SessionStore> =
        Arc::new(AccountSessionStore::new(Arc::clone(&user_repo)));

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        thing_repo,
        hasher,
        token_issuer,
        session_store,
        clock,
    ));
    services.auth.warm_up().await?;

    let state = HttpState {
        services,
        refresh_token_in_body: config.refresh_token_in_body(),
    };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
