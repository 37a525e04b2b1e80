//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API, WebSocket endpoint, and OpenAPI documentation.

use crate::{
    handlers,
    models::{CatalogItem, Countability, ErrorResponse, HintsResponse},
    state::AppState,
    ws::ws_handler,
};

use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_catalog,
        handlers::get_item,
        handlers::get_hints,
    ),
    components(
        schemas(CatalogItem, Countability, HintsResponse, ErrorResponse)
    ),
    tags(
        (name = "Magic Shop API", description = "Catalog and hints for the quantifier shopping game")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/catalog", get(handlers::list_catalog))
        .route("/catalog/{id}", get(handlers::get_item))
        .route("/hints", get(handlers::get_hints))
        .route("/ws", get(ws_handler))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use std::{net::SocketAddr, path::PathBuf, time::Duration};
    use magic_shop_core::{llm_client::ShopkeeperClient, session::TurnRequest};
    use tower::ServiceExt;

    /// Never called by the REST routes.
    struct UnusedClient;

    #[async_trait::async_trait]
    impl ShopkeeperClient for UnusedClient {
        async fn reply(&self, _request: TurnRequest) -> anyhow::Result<String> {
            anyhow::bail!("not used in REST tests")
        }
    }

    fn app() -> Router {
        let config = Config {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
            gemini_api_key: "test".to_string(),
            api_base: "http://localhost".to_string(),
            chat_model: "test-model".to_string(),
            temperature: 0.7,
            celebration_delay: Duration::from_secs(1),
            log_level: tracing::Level::INFO,
            prompts_path: PathBuf::from("./prompts"),
        };
        let state = AppState {
            shopkeeper: Arc::new(UnusedClient),
            system_template: Arc::new("test".to_string()),
            config: Arc::new(config),
        };
        create_router(Arc::new(state))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_catalog() {
        let (status, body) = get_json("/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);
        assert_eq!(body[0]["id"], "tomatoes");
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let (status, body) = get_json("/catalog/bananas").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Item with id 'bananas' not found");
    }

    #[tokio::test]
    async fn test_get_hints() {
        let (status, body) = get_json("/hints").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missions"][2], "a lot of");
    }
}
