use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::worker_controller::WorkerController;
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::worker_dto::{
    AvailableWorkersQuery, CreateWorkerRequest, UpdateWorkerRequest, WorkerDetailResponse,
    WorkerQuery, WorkerResponse, WorkerSummary,
};
use crate::middleware::auth::{auth_middleware, require_roles};
use crate::models::auth::AuthenticatedWorker;
use crate::models::worker::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_worker_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_worker))
        .route("/", get(list_workers))
        .route("/available", get(available_workers))
        .route("/:id", get(get_worker))
        .route("/:id", put(update_worker))
        .route("/:id", delete(delete_worker))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_worker(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Json(request): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WorkerResponse>>), AppError> {
    require_roles(&auth, &[Role::Admin])?;
    let controller = WorkerController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_workers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Query(filters): Query<WorkerQuery>,
) -> Result<Json<PaginatedResponse<WorkerResponse>>, AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = WorkerController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn available_workers(
    State(state): State<AppState>,
    Query(filters): Query<AvailableWorkersQuery>,
) -> Result<Json<ApiResponse<Vec<WorkerSummary>>>, AppError> {
    let controller = WorkerController::new(state.pool.clone());
    let response = controller.available(filters).await?;
    Ok(Json(response))
}

async fn get_worker(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WorkerDetailResponse>>, AppError> {
    let controller = WorkerController::new(state.pool.clone());
    let response = controller.get_detail(id, &auth).await?;
    Ok(Json(response))
}

async fn update_worker(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWorkerRequest>,
) -> Result<Json<ApiResponse<WorkerResponse>>, AppError> {
    // admin actualiza cualquier campo; un trabajador solo los datos básicos
    // de su propio perfil (verificado en el controller)
    let controller = WorkerController::new(state.pool.clone());
    let response = controller.update(id, &auth, request).await?;
    Ok(Json(response))
}

async fn delete_worker(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    require_roles(&auth, &[Role::Admin])?;
    let controller = WorkerController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
