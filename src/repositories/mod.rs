//! Repositorios de acceso a datos
//!
//! Cada repositorio recibe el pool en su construcción; no hay cliente
//! global de base de datos.

pub mod assignment_repository;
pub mod report_repository;
pub mod vehicle_repository;
pub mod worker_repository;
