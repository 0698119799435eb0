//! brigade-exporterd — the Brigade metrics exporter daemon.
//!
//! Polls a Brigade API server on a fixed interval and serves the resulting
//! gauges at `GET /metrics` in Prometheus text format, plus a `GET /healthz`
//! liveness probe.
//!
//! # Usage
//!
//! ```text
//! brigade-exporterd \
//!     --api-address http://brigade-apiserver:8080 \
//!     --scrape-interval 30
//! ```
//!
//! The API token is taken from `--api-token` or the `BRIGADE_API_TOKEN`
//! environment variable.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use brigade_exporter::{ExporterGauges, MetricsExporter};
use brigade_sdk::ApiClient;

#[derive(Parser)]
#[command(name = "brigade-exporterd", about = "Brigade metrics exporter daemon")]
struct Cli {
    /// Address to serve /metrics and /healthz on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Base URL of the Brigade API server.
    #[arg(long, default_value = "http://brigade-apiserver:8080")]
    api_address: String,

    /// API token. Falls back to the BRIGADE_API_TOKEN environment variable.
    #[arg(long)]
    api_token: Option<String>,

    /// Scrape interval in seconds.
    #[arg(long, default_value = "30", value_parser = parse_positive_secs)]
    scrape_interval: u64,
}

fn parse_positive_secs(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|e| format!("{e}"))?;
    if secs == 0 {
        return Err("scrape interval must be positive".to_string());
    }
    Ok(secs)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,brigade=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let token = match cli.api_token {
        Some(token) => token,
        None => std::env::var("BRIGADE_API_TOKEN")
            .context("--api-token not given and BRIGADE_API_TOKEN not set")?,
    };

    info!(
        api_address = %cli.api_address,
        scrape_interval_secs = cli.scrape_interval,
        "Brigade metrics exporter starting"
    );

    let client = ApiClient::new(cli.api_address, token);
    let exporter = MetricsExporter::new(
        client.core(),
        client.authn(),
        Duration::from_secs(cli.scrape_interval),
    );
    let gauges = exporter.gauges();

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Start scrape tasks ─────────────────────────────────────

    let scrape_handles = exporter.start(&shutdown_rx);

    // ── Start metrics server ───────────────────────────────────

    let router = build_router(gauges);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!(addr = %cli.listen, "metrics server starting");

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for the scrape tasks.
    for handle in scrape_handles {
        let _ = handle.await;
    }

    info!("Brigade metrics exporter stopped");
    Ok(())
}

/// Build the serving-layer router: the exposition endpoint and a liveness
/// probe.
fn build_router(gauges: Arc<ExporterGauges>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/healthz", get(healthz))
        .with_state(gauges)
}

async fn metrics(State(gauges): State<Arc<ExporterGauges>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        brigade_exporter::render(&gauges),
    )
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_gauges() -> Arc<ExporterGauges> {
        // A client pointed at an unreachable address; nothing is scraped,
        // so the gauges keep their initial zeros.
        let client = ApiClient::new("http://127.0.0.1:1", "test-token");
        let exporter =
            MetricsExporter::new(client.core(), client.authn(), Duration::from_secs(30));
        exporter.gauges()
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let router = build_router(test_gauges());

        let req = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn metrics_serves_prometheus_text() {
        let gauges = test_gauges();
        gauges.projects_total.set(4.0);
        let router = build_router(gauges);

        let req = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let content_type = resp
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("text/plain"));

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("brigade_projects_total 4\n"));
        // The phase vector is pre-initialized, so every phase renders.
        assert!(text.contains("brigade_events_by_worker_phase{workerPhase=\"RUNNING\"} 0\n"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let router = build_router(test_gauges());

        let req = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn scrape_interval_must_be_positive() {
        assert!(parse_positive_secs("30").is_ok());
        assert!(parse_positive_secs("0").is_err());
        assert!(parse_positive_secs("abc").is_err());
    }
}
