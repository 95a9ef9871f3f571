//! HTTP surface for the planning pipeline.

pub mod api;
pub mod error;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::pipeline::TrajectoryPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TrajectoryPipeline>,
}

/// Running server handle. Shuts down gracefully on [`Server::shutdown`] or
/// drop.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    pub async fn start(
        config: ServerConfig,
        pipeline: Arc<TrajectoryPipeline>,
    ) -> Result<Self, String> {
        let state = AppState { pipeline };
        let app = Router::new()
            .route("/health", get(api::health))
            .route("/openapi.json", get(api::openapi))
            .route("/api/plan", post(api::plan))
            .with_state(state)
            .layer(CorsLayer::permissive());
        let listener = TcpListener::bind(config.addr)
            .await
            .map_err(|error| error.to_string())?;
        let addr = listener.local_addr().map_err(|error| error.to_string())?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tracing::info!(%addr, "listening");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::config::ArmConfig;
    use crate::error::{PlanError, PlanResult};
    use crate::image::EncodedImage;
    use crate::planner::Planner;

    struct CannedPlanner {
        reply: PlanResult<String>,
    }

    #[async_trait]
    impl Planner for CannedPlanner {
        async fn generate(&self, _prompt: &str, _image: &EncodedImage) -> PlanResult<String> {
            self.reply.clone()
        }
    }

    async fn start_with(reply: PlanResult<String>) -> Server {
        let pipeline = Arc::new(TrajectoryPipeline::new(
            ArmConfig::default(),
            Arc::new(CannedPlanner { reply }),
        ));
        let config = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
        };
        Server::start(config, pipeline).await.expect("start")
    }

    fn single_step_reply() -> String {
        json!({
            "trajectory": [{
                "step_id": 1,
                "description": "Reach",
                "angles": {"shoulder": 30, "elbow": 0},
                "target_coords": {"x": 700, "y": 250},
                "gripper": "open",
                "duration": 1.2
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn health_responds_ok() {
        let mut server = start_with(Ok(single_step_reply())).await;
        let body = reqwest::get(format!("http://{}/health", server.addr()))
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert_eq!(body, "ok");
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn plan_returns_success_envelope() {
        let mut server = start_with(Ok(single_step_reply())).await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/plan", server.addr()))
            .json(&json!({
                "image": "data:image/png;base64,iVBORw0KGgo=",
                "instruction": "reach for the ball"
            }))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.expect("json");
        assert_eq!(body["success"], true);
        assert_eq!(body["trajectory"][0]["step_id"], 1);
        assert_eq!(body["trajectory"][0]["gripper"], "open");
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn blank_instruction_is_bad_request() {
        let mut server = start_with(Ok(single_step_reply())).await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/plan", server.addr()))
            .json(&json!({"image": "iVBORw0KGgo=", "instruction": "   "}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.expect("json");
        assert!(body["details"].as_str().unwrap().contains("instruction"));
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn missing_fields_are_client_errors() {
        let mut server = start_with(Ok(single_step_reply())).await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/plan", server.addr()))
            .json(&json!({"instruction": "wave"}))
            .send()
            .await
            .expect("request");
        assert!(response.status().is_client_error());
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn planner_transport_failure_is_bad_gateway() {
        let mut server = start_with(Err(PlanError::ExternalService {
            status: 500,
            body: "upstream exploded".to_string(),
        }))
        .await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/plan", server.addr()))
            .json(&json!({"image": "iVBORw0KGgo=", "instruction": "wave"}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 502);
        let body: serde_json::Value = response.json().await.expect("json");
        assert!(body["details"].as_str().unwrap().contains("500"));
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn invalid_trajectory_surfaces_field_paths() {
        let reply = json!({
            "trajectory": [{
                "step_id": 1,
                "description": "x",
                "angles": {"shoulder": 200, "elbow": 0},
                "target_coords": {"x": 1, "y": 1},
                "gripper": "open",
                "duration": 1
            }]
        })
        .to_string();
        let mut server = start_with(Ok(reply)).await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/plan", server.addr()))
            .json(&json!({"image": "iVBORw0KGgo=", "instruction": "wave"}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 500);
        let body: serde_json::Value = response.json().await.expect("json");
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("angles.shoulder"));
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let mut server = start_with(Ok(single_step_reply())).await;
        let body: serde_json::Value =
            reqwest::get(format!("http://{}/openapi.json", server.addr()))
                .await
                .expect("request")
                .json()
                .await
                .expect("json");
        assert!(body["paths"]["/api/plan"].is_object());
        server.shutdown().expect("shutdown");
    }
}
