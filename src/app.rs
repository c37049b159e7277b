// app.rs - Assemble one app's router with the shared endpoints and layers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::auth::TokenVerifier;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::database::{CastingStore, FyyurStore, HealthCheck, TriviaStore};
use crate::handlers::{casting, fallback, fyyur, trivia};
use crate::middleware::{cors, envelope_bare_errors};
use crate::types::AppKind;

#[derive(Clone)]
struct Service {
    kind: AppKind,
    backend: Arc<dyn HealthCheck>,
}

/// Full router for one app over a store that can back any of them.
///
/// Casting resolves its token verifier here, which may fetch the
/// provider's published key set.
pub async fn router_for<S>(
    kind: AppKind,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: &AppConfig,
) -> anyhow::Result<Router>
where
    S: FyyurStore + TriviaStore + CastingStore + HealthCheck + 'static,
{
    let routes = match kind {
        AppKind::Fyyur => fyyur::router(fyyur::FyyurState {
            store: store.clone(),
            clock,
        }),
        AppKind::Trivia => trivia::router(trivia::TriviaState {
            store: store.clone(),
            per_page: config.pagination.questions_per_page,
        }),
        AppKind::Casting => {
            let verifier = TokenVerifier::from_config(&config.security.auth).await?;
            casting::router(casting::CastingState {
                store: store.clone(),
                verifier: Arc::new(verifier),
                per_page: config.pagination.rows_per_page,
            })
        }
    };

    Ok(build(routes, store, kind, config))
}

/// Wrap an app's routes with `/`, `/health`, the JSON 404 fallback, error
/// enveloping, CORS from config and request tracing
pub fn build(
    routes: Router,
    backend: Arc<dyn HealthCheck>,
    kind: AppKind,
    config: &AppConfig,
) -> Router {
    let shared = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(Service { kind, backend });

    let mut app = Router::new()
        .merge(shared)
        .merge(routes)
        .fallback(fallback)
        .layer(map_response(envelope_bare_errors));

    if let Some(cors) = cors::layer(&config.security) {
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

async fn root(State(service): State<Service>) -> Json<Value> {
    Json(json!({
        "success": true,
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "app": service.kind,
    }))
}

async fn health(State(service): State<Service>) -> impl IntoResponse {
    match service.backend.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "status": "ok",
                "database": "ok",
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": 503,
                    "message": "database unavailable",
                    "status": "degraded",
                })),
            )
        }
    }
}
