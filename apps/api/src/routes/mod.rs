//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /api                           banner                           │
//! │  GET    /health                        database ping                    │
//! │                                                                         │
//! │  GET    /api/items                     list catalogue                   │
//! │  POST   /api/items                     add item                         │
//! │  PUT    /api/items/{id}                rename / reprice                 │
//! │  DELETE /api/items/{id}                remove item                      │
//! │                                                                         │
//! │  GET    /api/sales                     full log, newest first           │
//! │  GET    /api/sales/recent              latest N                         │
//! │  POST   /api/sales                     record one sale                  │
//! │  POST   /api/sales/checkout            record a cart atomically         │
//! │                                                                         │
//! │  ── passcode gate ──────────────────────────────────────────────────    │
//! │  GET    /api/reports/today             today's per-item totals          │
//! │  GET    /api/reports/today/csv         download                         │
//! │  GET    /api/reports/daily             every day, newest first          │
//! │  GET    /api/reports/daily/{date}      one day                          │
//! │  GET    /api/reports/daily/{date}/csv  download                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod health;
pub mod items;
pub mod reports;
pub mod sales;

/// Build a router with all routes registered (no outer middleware).
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(items::router())
        .merge(sales::router())
        // Report API - passcode gate when configured
        .merge(reports::router(state))
}

/// Build the fully configured application.
///
/// Used by the server and, in-process, by the handler tests.
pub fn build_app(state: AppState) -> Router {
    build_router(&state)
        // CORS - the web frontend is served from another origin
        .layer(CorsLayer::permissive())
        // Trace - request spans
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use dsr_db::{Database, DbConfig};

    use super::build_app;
    use crate::config::ApiConfig;
    use crate::state::AppState;

    pub async fn test_state(config: ApiConfig) -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, config)
    }

    pub async fn test_app() -> (Router, AppState) {
        let state = test_state(ApiConfig::default()).await;
        (build_app(state.clone()), state)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }
}
