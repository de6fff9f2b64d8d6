use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::report_controller::ReportController;
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::report_dto::{
    CreateReportRequest, LocationQuery, ReportQuery, ReportResponse, UpdateReportRequest,
};
use crate::middleware::auth::{auth_middleware, require_roles};
use crate::models::auth::AuthenticatedWorker;
use crate::models::worker::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_report))
        .route("/", get(list_reports))
        .route("/location", get(reports_by_location))
        .route("/:id", get(get_report))
        .route("/:id", put(update_report))
        .route("/:id", delete(delete_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponse>>), AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_reports(
    State(state): State<AppState>,
    Query(filters): Query<ReportQuery>,
) -> Result<Json<PaginatedResponse<ReportResponse>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn reports_by_location(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponse>>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.by_location(query).await?;
    Ok(Json(response))
}

async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReportRequest>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
