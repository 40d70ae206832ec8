use axum::http::{header, HeaderName, Method};
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRef, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quiz_router, ApiError, ApiResponse};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::SqliteRepository;
use crate::settings::Settings;

#[derive(FromRef, Clone)]
pub struct AppState {
    repo: SqliteRepository,
    questions_per_page: usize,
}

impl AppState {
    pub fn new(repo: SqliteRepository, questions_per_page: usize) -> Self {
        Self {
            repo,
            questions_per_page,
        }
    }

    pub fn repo(&self) -> &SqliteRepository {
        &self.repo
    }

    pub fn questions_per_page(&self) -> usize {
        self.questions_per_page
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quiz_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(repo: SqliteRepository, settings: &Settings) -> anyhow::Result<()> {
    let app = router(AppState::new(repo, settings.questions_per_page));
    let listener = TcpListener::bind(&settings.bind_address).await?;

    tracing::info!("Serving on {}", settings.bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> ApiResponse<Response> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).map_err(|e| {
        tracing::error!("Failed to encode metrics: {e}");
        ApiError::Internal
    })?;
    let content_type: (HeaderName, String) =
        (header::CONTENT_TYPE, encoder.format_type().to_owned());
    Ok(([content_type], buf).into_response())
}
