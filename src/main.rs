// src/main.rs
use anyhow::Result;
use kawaraban::application::{
    ports::{time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use kawaraban::config::AppConfig;
use kawaraban::domain::{
    category::{CategoryAssignmentRepository, CategoryReadRepository, CategoryWriteRepository},
    post::{PostReadRepository, PostWriteRepository},
};
use kawaraban::infrastructure::{
    database,
    repositories::{
        PostgresCategoryAssignmentRepository, PostgresCategoryReadRepository,
        PostgresCategoryWriteRepository, PostgresPostReadRepository, PostgresPostWriteRepository,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use kawaraban::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
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

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.max_db_connections()).await?;
    database::run_migrations(&pool).await?;

    let post_write_repo: Arc<dyn PostWriteRepository> =
        Arc::new(PostgresPostWriteRepository::new(pool.clone()));
    let post_read_repo: Arc<dyn PostReadRepository> =
        Arc::new(PostgresPostReadRepository::new(pool.clone()));
    let category_write_repo: Arc<dyn CategoryWriteRepository> =
        Arc::new(PostgresCategoryWriteRepository::new(pool.clone()));
    let category_read_repo: Arc<dyn CategoryReadRepository> =
        Arc::new(PostgresCategoryReadRepository::new(pool.clone()));
    let assignment_repo: Arc<dyn CategoryAssignmentRepository> =
        Arc::new(PostgresCategoryAssignmentRepository::new(pool.clone()));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::default());

    let services = Arc::new(ApplicationServices::new(
        post_write_repo,
        post_read_repo,
        category_write_repo,
        category_read_repo,
        assignment_repo,
        clock,
        slugger,
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app.into_make_service())
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
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
