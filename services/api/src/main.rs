use tokio::net::TcpListener;
use tracing::{error, info};

use reppay_api::config::ApiConfig;
use reppay_api::infra::{db, mail::MailTransport};
use reppay_api::router::build_router;
use reppay_api::state::AppState;
use reppay_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env();
    init_tracing(config.log_format);

    let db = db::connect(&config.database_url, config.database_max_connections)
        .await
        .inspect_err(|e| {
            error!(error = %e, url = %config.database_url, "failed to connect to database");
        })?;
    db::migrate(&db, config.database_reset).await?;

    let mailer = MailTransport::from_config(&config)?;
    info!(transport = mailer.name(), "mailer ready");

    let router = build_router(AppState { db, mailer });
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("reppay api listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("reppay api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
