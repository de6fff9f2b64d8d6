//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer, lo valida y verifica que el trabajador siga
//! existiendo y activo antes de inyectarlo en la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::auth::AuthenticatedWorker;
use crate::models::worker::{Role, WorkerStatus};
use crate::repositories::worker_repository::WorkerRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("No se proporcionó token de autenticación".to_string())
        })?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let worker_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de trabajador inválido".to_string()))?;

    // El token puede sobrevivir al trabajador: verificar contra la base
    let worker = WorkerRepository::new(state.pool.clone())
        .find_by_id(worker_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Trabajador no encontrado".to_string()))?;

    if worker.status != WorkerStatus::Active {
        return Err(AppError::Unauthorized(
            "Cuenta inactiva o suspendida".to_string(),
        ));
    }

    request.extensions_mut().insert(AuthenticatedWorker {
        worker_id: worker.id,
        email: worker.email,
        role: worker.role,
    });

    Ok(next.run(request).await)
}

/// Verificar que el trabajador autenticado tenga uno de los roles requeridos
pub fn require_roles(auth: &AuthenticatedWorker, roles: &[Role]) -> Result<(), AppError> {
    if !roles.contains(&auth.role) {
        let names = roles
            .iter()
            .map(Role::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        return Err(AppError::Forbidden(format!(
            "Se requiere uno de los siguientes roles: {}",
            names
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_with(role: Role) -> AuthenticatedWorker {
        AuthenticatedWorker {
            worker_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_roles_accepts_listed_role() {
        let auth = auth_with(Role::Supervisor);
        assert!(require_roles(&auth, &[Role::Admin, Role::Supervisor]).is_ok());
    }

    #[test]
    fn test_require_roles_rejects_unlisted_role() {
        let auth = auth_with(Role::Worker);
        let err = require_roles(&auth, &[Role::Admin, Role::Supervisor]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
