//! Routers de la API

pub mod assignment_routes;
pub mod auth_routes;
pub mod report_routes;
pub mod vehicle_routes;
pub mod worker_routes;
