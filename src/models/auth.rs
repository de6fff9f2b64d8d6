//! Modelo de autenticación
//!
//! Trabajador autenticado que se inyecta en las requests después de
//! validar el token.

use uuid::Uuid;

use crate::models::worker::Role;

/// Trabajador autenticado, inyectado como extensión de la request
#[derive(Debug, Clone)]
pub struct AuthenticatedWorker {
    pub worker_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedWorker {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_admin_or_supervisor(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Supervisor)
    }
}
