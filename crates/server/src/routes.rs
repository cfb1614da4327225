use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Info};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod items;

pub const ROOT_MESSAGE: &str = "Item management API is running. See /api/items and /api-docs/openapi.json";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::up())
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service info", body = crate::openapi::InfoResponse)))]
pub async fn root() -> Json<Info> {
    Json(Info { message: ROOT_MESSAGE })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: operational endpoints plus the item API
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // static segments win over `:id`
    let api = Router::new()
        .route("/api/items", get(items::list).post(items::create))
        .route("/api/items/search", get(items::search_by_name))
        .route("/api/items/price", get(items::search_by_max_price))
        .route(
            "/api/items/:id",
            get(items::get).put(items::update).delete(items::delete),
        );

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use migration::MigratorTrait;
    use models::db::{connect_with_config, DatabaseConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> anyhow::Result<Router> {
        let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
        migration::Migrator::up(&db, None).await?;
        Ok(build_router(ServerState::new(db), CorsLayer::very_permissive()))
    }

    async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let res = app.clone().oneshot(req).await?;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, body))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn health_reports_up() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, get_req("/health")).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "UP"}));
        Ok(())
    }

    #[tokio::test]
    async fn root_has_message() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, get_req("/")).await?;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn list_starts_empty() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, get_req("/api/items")).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn create_returns_201_with_id() -> anyhow::Result<()> {
        let app = test_app().await?;
        let req = json_req("POST", "/api/items", json!({"name": "Test Item", "description": "Test Description", "price": 10.0, "quantity": 5}));
        let (status, body) = send(&app, req).await?;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].is_i64());
        assert_eq!(body["name"], "Test Item");
        assert_eq!(body["price"], 10.0);
        assert_eq!(body["quantity"], 5);
        Ok(())
    }

    #[tokio::test]
    async fn create_without_name_is_400() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, json_req("POST", "/api/items", json!({"price": 1.0}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_400() -> anyhow::Result<()> {
        let app = test_app().await?;
        let req = Request::builder()
            .method("POST")
            .uri("/api/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))?;
        let (status, body) = send(&app, req).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_item_is_404() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, _) = send(&app, get_req("/api/items/9999")).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, json_req("PUT", "/api/items/9999", json!({"name": "x"}))).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let req = Request::builder().method("DELETE").uri("/api/items/9999").body(Body::empty())?;
        let (status, _) = send(&app, req).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn id_beyond_32_bits_is_404() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, get_req("/api/items/3000000000")).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        let (status, _) = send(&app, json_req("PUT", "/api/items/3000000000", json!({"name": "x"}))).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let req = Request::builder().method("DELETE").uri("/api/items/3000000000").body(Body::empty())?;
        let (status, _) = send(&app, req).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, get_req("/api/items/abc")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        Ok(())
    }

    #[tokio::test]
    async fn searches_filter_items() -> anyhow::Result<()> {
        let app = test_app().await?;
        for (name, price) in [("Apple", 1.0), ("Banana", 0.5), ("Orange", 0.75)] {
            let (status, _) = send(&app, json_req("POST", "/api/items", json!({"name": name, "price": price}))).await?;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, get_req("/api/items/search?name=an")).await?;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body.as_array().unwrap().iter().filter_map(|v| v["name"].as_str()).collect();
        assert_eq!(names, ["Banana", "Orange"]);

        let (status, body) = send(&app, get_req("/api/items/price?max=1.0")).await?;
        assert_eq!(status, StatusCode::OK);
        let prices: Vec<f64> = body.as_array().unwrap().iter().filter_map(|v| v["price"].as_f64()).collect();
        assert_eq!(prices, [0.5, 0.75]);
        Ok(())
    }

    #[tokio::test]
    async fn search_without_params_is_400() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, _) = send(&app, get_req("/api/items/search")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, get_req("/api/items/price?max=cheap")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn serves_openapi_document() -> anyhow::Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, get_req("/api-docs/openapi.json")).await?;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/items/{id}"].is_object());
        Ok(())
    }
}
