//! API server lifecycle: bind → spawn background task → return a handle
//! with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Handle to a running API server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ApiServer {
    /// Send the graceful-shutdown signal. In-flight requests complete.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("API server task failed: {e}");
        }
    }
}

/// Bind `addr` (port 0 picks an ephemeral port) and serve the API router
/// in a background task.
pub async fn start_server(core: Arc<CoreState>, addr: SocketAddr) -> std::io::Result<ApiServer> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let app = api_router(core);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::tests::test_state;
    use std::net::{IpAddr, Ipv4Addr};

    async fn start() -> ApiServer {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        start_server(Arc::new(test_state()), addr)
            .await
            .expect("server should start")
    }

    #[tokio::test]
    async fn serves_health_and_stops() {
        let mut server = start().await;
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/api/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn predict_over_http() {
        let mut server = start().await;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://{}/api/predict", server.addr))
            .json(&serde_json::json!({ "user_input": "Dry cough since Monday" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["predicted_disease"], "Common Cold");

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start().await;
        server.shutdown();
        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_an_error() {
        let server = start().await;
        let result = start_server(Arc::new(test_state()), server.addr).await;
        assert!(result.is_err());
    }
}
