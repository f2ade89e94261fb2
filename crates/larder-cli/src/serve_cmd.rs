use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use larder_core::diet::{GenerationLimits, PlanDuration, generate};
use larder_core::filter::{MealPools, compatible};
use larder_store::{Catalog, PantryRegistry};

use crate::api::{
    CompatibleRecipesRequest, CompatibleRecipesResponse, DietResponse, GenerateDietRequest,
    HealthResponse, SavePantryRequest, SavePantryResponse,
};
use crate::config::LarderConfig;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the handlers share. The catalog is read-only after startup.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub pantries: PantryRegistry,
    pub limits: GenerationLimits,
}

impl AppState {
    pub fn new(catalog: Catalog, limits: GenerationLimits) -> Self {
        Self {
            catalog: Arc::new(catalog),
            pantries: PantryRegistry::new(),
            limits,
        }
    }
}

type SharedState = Arc<AppState>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build a CORS layer for the configured origins. `"*"` allows any origin.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {o:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pantry", post(save_pantry))
        .route("/recipes/compatible", post(compatible_recipes))
        .route("/diet/generate", post(generate_diet))
        .layer(cors)
        .with_state(Arc::new(state))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(config: &LarderConfig, catalog: Catalog) -> Result<()> {
    let cors = cors_layer(&config.allowed_origins)?;
    let app = build_router(AppState::new(catalog, config.limits), cors);
    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.bind, config.port))?;
    tracing::info!("larder serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("larder serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {err}");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        recipes: state.catalog.len(),
        pantries: state.pantries.len().await,
    })
}

async fn save_pantry(
    State(state): State<SharedState>,
    payload: Result<Json<SavePantryRequest>, JsonRejection>,
) -> Result<Json<SavePantryResponse>, AppError> {
    let Json(req) = payload?;
    let ingredient_count = req.ingredient_ids.len();
    let pantry_id = state.pantries.save(req.ingredient_ids).await;
    Ok(Json(SavePantryResponse {
        pantry_id,
        ingredient_count,
    }))
}

async fn compatible_recipes(
    State(state): State<SharedState>,
    payload: Result<Json<CompatibleRecipesRequest>, JsonRejection>,
) -> Result<Json<CompatibleRecipesResponse>, AppError> {
    let Json(req) = payload?;
    let pantry = state.pantries.get(&req.pantry_id).await;
    let found = compatible(&pantry, state.catalog.recipes());
    Ok(Json(CompatibleRecipesResponse::new(&found)))
}

async fn generate_diet(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateDietRequest>, JsonRejection>,
) -> Result<Json<DietResponse>, AppError> {
    let Json(req) = payload?;
    let pantry = state.pantries.get(&req.pantry_id).await;
    Ok(Json(plan_diet(&state, &pantry, &req)))
}

fn plan_diet(state: &AppState, pantry: &HashSet<String>, req: &GenerateDietRequest) -> DietResponse {
    if req.meals_per_day != 3.0 {
        tracing::debug!(
            meals_per_day = req.meals_per_day,
            "meals_per_day ignored; plans use breakfast, lunch and dinner"
        );
    }
    let pools = MealPools::for_pantry(pantry, state.catalog.recipes());
    let duration = PlanDuration::from_selector(&req.duration);
    let plan = generate(
        &pools,
        duration,
        &req.nutrition_range,
        &state.limits,
        &mut rand::rng(),
    );
    DietResponse::from(&plan)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
