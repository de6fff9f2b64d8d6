use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetailResponse, VehicleQuery,
    VehicleResponse, VehicleSummary,
};
use crate::middleware::auth::{auth_middleware, require_roles};
use crate::models::auth::AuthenticatedWorker;
use crate::models::worker::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/available", get(available_vehicles))
        .route("/plate/:license_plate", get(get_vehicle_by_plate))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleQuery>,
) -> Result<Json<PaginatedResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn available_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleSummary>>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.available().await?;
    Ok(Json(response))
}

async fn get_vehicle_by_plate(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_plate(&license_plate).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_detail(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    require_roles(&auth, &[Role::Admin, Role::Supervisor])?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedWorker>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    require_roles(&auth, &[Role::Admin])?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
