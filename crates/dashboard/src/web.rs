use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::state::SharedState;

const INDEX_HTML: &str = include_str!("ui/index.html");

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/status", get(api_status))
        .with_state(state)
}

async fn index() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], INDEX_HTML)
}

async fn api_status(State(state): State<SharedState>) -> impl IntoResponse {
    let st = state.read().await;
    Json(st.to_status())
}

// ---------------------------------------------------------------------------
// Server entry-point
// ---------------------------------------------------------------------------

/// Serve the dashboard until `shutdown` is cancelled.
pub async fn serve(state: SharedState, addr: SocketAddr, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind web port {addr}"))?;

    tracing::info!("web ui listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("web server error")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::state::DashboardState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use envdash_sim::{Channel, SensorSim};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn shared_for(sim: &SensorSim) -> SharedState {
        DashboardState::shared(render(&sim.snapshot(), &sim.readings(), sim.evaluate()))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn index_serves_html() {
        let app = router(shared_for(&SensorSim::with_seed(1)));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("/api/status"));
    }

    #[tokio::test]
    async fn status_reports_current_view() {
        let mut sim = SensorSim::with_seed(1);
        sim.set(Channel::Temperature, 15.0);
        let app = router(shared_for(&sim));

        let (status, body) = get_body(app, "/api/status").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["view"]["system"]["status"], "warning");
        assert_eq!(json["view"]["cards"][0]["value"], "15.0");
        assert_eq!(json["view"]["warnings"][0]["type"], "Temperature Too Low");
        assert_eq!(json["view"]["warnings"][0]["sensor"], "temperature");
    }

    #[tokio::test]
    async fn status_follows_recorded_ticks() {
        let mut sim = SensorSim::with_seed(1);
        let shared = shared_for(&sim);

        sim.set(Channel::Light, 900.0);
        shared
            .write()
            .await
            .record_tick(render(&sim.snapshot(), &sim.readings(), sim.evaluate()));

        let (_, body) = get_body(router(shared), "/api/status").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ticks"], 1);
        assert_eq!(json["view"]["cards"][2]["value"], "900");
        assert_eq!(json["events"][0]["kind"], "alert");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = router(shared_for(&SensorSim::with_seed(1)));
        let (status, _) = get_body(app, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
