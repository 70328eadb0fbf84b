use crate::cli::Args;
use crate::knowledge::{ catalog, fines::{ FINE_TABLE, ViolationFineEntry } };
use crate::models::chat::{ ClassificationResult, HistoryEntry };
use crate::models::violation::{ ExplainResponse, ViolationCategory, ViolationSummary };
use crate::router::{ IntentRouter, RouteStats };
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Json,
    Router,
    extract::{ Path, Query, State },
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use serde::{ Deserialize, Serialize };
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

#[derive(Clone)]
struct AppState {
    router: Arc<IntentRouter>,
}

pub fn build_router(router: Arc<IntentRouter>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/fines", get(fines_handler))
        .route("/api/violations", get(violations_handler))
        .route("/api/violations/{id}/explanation", get(explanation_handler))
        .route("/api/stats", get(stats_handler))
        .layer(cors)
        .with_state(AppState { router })
}

pub async fn start_http_server(
    http_port: u16,
    router: Arc<IntentRouter>,
    args: Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = format!("0.0.0.0:{}", http_port).parse::<SocketAddr>()?;
    info!("Starting HTTP API server on: http://{}", addr);

    let app = build_router(router);

    match (args.enable_tls, &args.tls_cert_path, &args.tls_key_path) {
        (true, Some(cert_path), Some(key_path)) => {
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                cert_path,
                key_path
            ).await?;

            tokio::spawn(async move {
                let result = axum_server::bind_rustls(addr, tls_config)
                    .serve(app.into_make_service())
                    .await;

                if let Err(e) = result {
                    error!("HTTPS server error: {}", e);
                }
            });

            info!("HTTPS server started with TLS enabled");
        }
        _ => {
            tokio::spawn(async move {
                match tokio::net::TcpListener::bind(addr).await {
                    Ok(listener) => {
                        if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                            error!("HTTP server error: {}", e);
                        }
                    },
                    Err(e) => {
                        error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                    }
                }
            });

            info!("HTTP server started");
        }
    }

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ClassificationResult> {
    Json(state.router.classify(&req.message, &req.history).await)
}

async fn fines_handler() -> Json<&'static [ViolationFineEntry]> {
    Json(FINE_TABLE)
}

async fn violations_handler(Query(query): Query<CatalogQuery>) -> Response {
    let category = match query.category.as_deref().map(str::trim).filter(|c| !c.is_empty() && *c != "all") {
        Some(raw) => match raw.parse::<ViolationCategory>() {
            Ok(category) => Some(category),
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorBody {
                    success: false,
                    error: e.to_string(),
                })).into_response();
            }
        },
        None => None,
    };

    let summaries: Vec<&'static ViolationSummary> = catalog(query.q.as_deref(), category);
    Json(summaries).into_response()
}

async fn explanation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let response = state.router.explain(&id);
    let code = if response.is_success() { StatusCode::OK } else { StatusCode::NOT_FOUND };
    (code, Json::<ExplainResponse>(response)).into_response()
}

async fn stats_handler(State(state): State<AppState>) -> Json<RouteStats> {
    Json(state.router.stats())
}
