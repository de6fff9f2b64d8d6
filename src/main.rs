mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::{
    http::{StatusCode, Uri},
    middleware as axum_middleware,
    response::Json,
    routing::get,
    Router,
};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::rate_limit::rate_limit_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🕳️  API Baches Yucatán - Sistema de reportes de baches");
    info!("======================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    if let Err(e) = database::run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(e);
    }
    info!("✅ Base de datos lista");

    let app_state = AppState::new(pool, config.clone());

    // Árbol /api con rate limiting, como el limiter del API original
    let api_router = Router::new()
        .route("/health", get(health_check))
        .nest("/auth", routes::auth_routes::create_auth_router(app_state.clone()))
        .nest("/reports", routes::report_routes::create_report_router(app_state.clone()))
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router(app_state.clone()))
        .nest("/workers", routes::worker_routes::create_worker_router(app_state.clone()))
        .nest("/assignments", routes::assignment_routes::create_assignment_router(app_state.clone()))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ));

    // En producción solo se admiten los orígenes configurados
    let cors = if config.is_production() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = Router::new()
        .route("/", get(root_endpoint))
        .nest("/api", api_router)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("🔐 Autenticación:");
    info!("   POST /api/auth/register - Registrar trabajador");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/profile - Perfil del trabajador actual");
    info!("🕳️  Reportes:");
    info!("   POST /api/reports - Crear reporte");
    info!("   GET  /api/reports - Listar reportes");
    info!("   GET  /api/reports/location - Reportes por ubicación");
    info!("   GET  /api/reports/:id - Obtener reporte");
    info!("   PUT  /api/reports/:id - Actualizar reporte");
    info!("   DELETE /api/reports/:id - Eliminar reporte");
    info!("🚗 Vehículos:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/available - Vehículos disponibles");
    info!("   GET  /api/vehicles/plate/:matricula - Vehículo por matrícula");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("👷 Trabajadores:");
    info!("   POST /api/workers - Crear trabajador");
    info!("   GET  /api/workers - Listar trabajadores");
    info!("   GET  /api/workers/available - Trabajadores disponibles");
    info!("   GET  /api/workers/:id - Obtener trabajador");
    info!("   PUT  /api/workers/:id - Actualizar trabajador");
    info!("   DELETE /api/workers/:id - Eliminar trabajador");
    info!("📋 Asignaciones:");
    info!("   POST /api/assignments - Crear asignación");
    info!("   GET  /api/assignments - Listar asignaciones");
    info!("   GET  /api/assignments/my - Mis asignaciones");
    info!("   GET  /api/assignments/stats - Estadísticas");
    info!("   GET  /api/assignments/:id - Obtener asignación");
    info!("   PUT  /api/assignments/:id - Actualizar asignación");
    info!("   DELETE /api/assignments/:id - Eliminar asignación");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Banner de la raíz con el índice de endpoints
async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "API Baches Yucatán funcionando 🚀",
        "version": "1.0.0",
        "endpoints": {
            "health": "/api/health",
            "auth": "/api/auth",
            "reports": "/api/reports",
            "vehicles": "/api/vehicles",
            "workers": "/api/workers",
            "assignments": "/api/assignments"
        }
    }))
}

/// Health check
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "message": "API Baches Yucatán funcionando correctamente",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": "1.0.0"
    }))
}

/// Handler para rutas inexistentes
async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint no encontrado",
            "message": format!("La ruta {} no existe en esta API", uri)
        })),
    )
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
