use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::assignment_controller::AssignmentController;
use crate::dto::assignment_dto::{
    AssignmentQuery, AssignmentResponse, AssignmentStatsResponse, CreateAssignmentRequest,
    MyAssignmentsQuery, UpdateAssignmentRequest,
};
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::middleware::auth::{auth_middleware, require_roles};
use crate::models::auth::AuthenticatedWorker;
use crate::models::worker::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_assignment_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/", get(list_assignments))
        .route("/my", get(my_assignments))
        .route("/stats", get(assignment_stats))
        .route("/:id", get(get_assignment))
        .route("/:id", put(update_assignment))
        .route("/:id", delete(delete_assignment))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_assignment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Json(request): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AssignmentResponse>>), AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_assignments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Query(filters): Query<AssignmentQuery>,
) -> Result<Json<PaginatedResponse<AssignmentResponse>>, AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn my_assignments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Query(filters): Query<MyAssignmentsQuery>,
) -> Result<Json<PaginatedResponse<AssignmentResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.list_for_worker(auth.worker_id, filters).await?;
    Ok(Json(response))
}

async fn assignment_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
) -> Result<Json<ApiResponse<AssignmentStatsResponse>>, AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AssignmentResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_assignment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAssignmentRequest>,
) -> Result<Json<ApiResponse<AssignmentResponse>>, AppError> {
    // admin/supervisor actualizan cualquier campo; un trabajador solo el
    // progreso y notas de su propia asignación (verificado en el controller)
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.update(id, &auth, request).await?;
    Ok(Json(response))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
