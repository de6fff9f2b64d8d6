use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::dto::common::ApiResponse;
use crate::dto::worker_dto::{CreateWorkerRequest, WorkerResponse};
use crate::middleware::auth::auth_middleware;
use crate::models::auth::AuthenticatedWorker;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(
            Router::new()
                .route("/profile", get(profile))
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
) -> Result<Json<ApiResponse<WorkerResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.profile(auth.worker_id).await?;
    Ok(Json(response))
}
