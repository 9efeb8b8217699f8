use std::future::Future;
use std::time::Duration;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::routes;
use crate::state::AppState;

/// Public entry: build the app from a validated config and serve until Ctrl+C/SIGTERM.
/// Logging must already be initialized by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    let state = AppState::in_memory(cfg.server.request_timeout(), shutdown.clone());
    let app: Router = routes::build_router(state);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        %addr,
        request_timeout_secs = cfg.server.request_timeout_secs,
        "starting item server"
    );

    serve(listener, app, shutdown, cfg.server.shutdown_grace(), shutdown_signal()).await
}

/// Serve `app` until `signal` resolves, then cancel `shutdown` and wait at most
/// `grace` for open connections to finish.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
    grace: Duration,
    signal: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let token = shutdown.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move { token.cancelled().await });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        res = &mut handle => {
            res??;
            info!(event = "stop", "server exited on its own");
            return Ok(());
        }
        _ = signal => {
            info!(event = "shutdown_signal", grace_secs = grace.as_secs(), "shutting down server");
        }
    }

    // in-flight requests see Canceled at their next store call
    shutdown.cancel();

    match tokio::time::timeout(grace, handle).await {
        Ok(res) => {
            res??;
            info!(event = "stop", "server stopped");
        }
        Err(_) => {
            warn!(event = "shutdown_timeout", grace_secs = grace.as_secs(), "graceful shutdown timed out");
        }
    }
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
