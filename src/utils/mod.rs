//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT, contraseñas y paginación.

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
