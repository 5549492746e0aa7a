//! Intake server lifecycle: bind, spawn the axum server in a background
//! task, return a handle with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::intake_router;
use crate::core_state::CoreState;

/// Session metadata for a running intake server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running intake server.
pub struct IntakeServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl IntakeServer {
    /// Ask the server to stop accepting connections. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Intake server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish draining.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Intake server task failed: {e}");
        }
    }
}

/// Start the intake server on `addr`. Port 0 picks an ephemeral port.
pub async fn start_server(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<IntakeServer, std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let app = intake_router(core);

    let session = ServerSession {
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Intake server received shutdown signal");
        };

        tracing::info!(%addr, "Intake server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Intake server error: {e}");
        }

        tracing::info!("Intake server stopped");
    });

    Ok(IntakeServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
