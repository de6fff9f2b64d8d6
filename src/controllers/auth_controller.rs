//! Controller de autenticación
//!
//! Registro, login y perfil. El login de un trabajador de campo resuelve
//! además su vehículo asignado (derivado de assignments), que es requisito
//! para entrar a la app móvil.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, AuthWorkerData, LoginRequest};
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::VehicleSummary;
use crate::dto::worker_dto::{CreateWorkerRequest, WorkerResponse};
use crate::models::worker::{Role, WorkerStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::worker_repository::WorkerRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::password::{hash_password, verify_password};

pub struct AuthController {
    workers: WorkerRepository,
    vehicles: VehicleRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            workers: WorkerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(&self, request: CreateWorkerRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.workers.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "Ya existe un trabajador con este correo".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let worker = self.workers.create(&request, password_hash).await?;

        let token = generate_token(worker.id, &worker.email, worker.role, &self.jwt_config)?;

        Ok(AuthResponse {
            message: "Trabajador registrado exitosamente".to_string(),
            data: AuthWorkerData::from(&worker),
            token,
            vehicle: None,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let worker = self
            .workers
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Email o contraseña incorrectos".to_string())
            })?;

        if worker.status != WorkerStatus::Active {
            return Err(AppError::Forbidden(
                "Tu cuenta está inactiva. Contacta al administrador.".to_string(),
            ));
        }

        if !verify_password(&request.password, &worker.password_hash)? {
            return Err(AppError::Unauthorized(
                "Email o contraseña incorrectos".to_string(),
            ));
        }

        let token = generate_token(worker.id, &worker.email, worker.role, &self.jwt_config)?;

        // Un trabajador de campo necesita un vehículo asignado para usar
        // la app móvil
        let vehicle = if worker.role == Role::Worker {
            let assigned = self.vehicles.find_assigned_to_worker(worker.id).await?;

            match assigned {
                Some(vehicle) => Some(VehicleSummary::from(&vehicle)),
                None => {
                    return Err(AppError::Forbidden(
                        "No tienes un vehículo asignado. No puedes ingresar a la app móvil hasta que se te asigne uno.".to_string(),
                    ))
                }
            }
        } else {
            None
        };

        Ok(AuthResponse {
            message: "Login exitoso".to_string(),
            data: AuthWorkerData::from(&worker),
            token,
            vehicle,
        })
    }

    pub async fn profile(&self, worker_id: Uuid) -> Result<ApiResponse<WorkerResponse>, AppError> {
        let worker = self
            .workers
            .find_by_id(worker_id)
            .await?
            .ok_or_else(|| AppError::NotFound("El perfil del trabajador no existe".to_string()))?;

        Ok(ApiResponse::new(
            "Perfil obtenido exitosamente",
            WorkerResponse::from(worker),
        ))
    }
}
