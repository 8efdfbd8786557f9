use mimalloc::MiMalloc;
use student_roster::config::Config;
use student_roster::router::{RosterState, roster_router};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        default_page_size = cfg.page_size(),
        insecure_cookie = cfg.insecure_cookie
    );
    if cfg.cookie_secret.is_none() {
        warn!("no cookie_secret configured; sessions will not survive a restart");
    }

    let pool = student_roster::db::connect(&cfg.database_url).await?;
    let state = RosterState::from_pool(pool, &cfg).await?;
    state.sessions.purge_expired().await?;

    state
        .users
        .seed_default_user(&cfg.seed_username, &cfg.seed_password, cfg.bcrypt_cost)
        .await?;

    let app = roster_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
