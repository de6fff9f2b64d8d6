use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn test_root_banner_lists_endpoints() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["endpoints"]["assignments"], "/api/assignments");
    assert_eq!(body["endpoints"]["reports"], "/api/reports");
}

#[tokio::test]
async fn test_unknown_route_returns_404_payload() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/api/no-existe").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Endpoint no encontrado");
}

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::get("/api/assignments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = read_json(response).await;
    assert_eq!(body["error"], "No autenticado");
}

#[tokio::test]
async fn test_protected_route_accepts_bearer_token() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::get("/api/assignments")
                .header(header::AUTHORIZATION, "Bearer token-de-prueba")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// App de test autocontenida con la misma forma de respuestas que la API
fn create_test_app() -> Router {
    let protected = Router::new()
        .route(
            "/api/assignments",
            get(|| async { Json(json!({ "data": [], "pagination": { "page": 1 } })) }),
        )
        .route_layer(middleware::from_fn(stub_auth));

    Router::new()
        .route(
            "/",
            get(|| async {
                Json(json!({
                    "message": "API Baches Yucatán funcionando 🚀",
                    "endpoints": {
                        "health": "/api/health",
                        "auth": "/api/auth",
                        "reports": "/api/reports",
                        "vehicles": "/api/vehicles",
                        "workers": "/api/workers",
                        "assignments": "/api/assignments"
                    }
                }))
            }),
        )
        .route(
            "/api/health",
            get(|| async {
                Json(json!({
                    "status": "OK",
                    "message": "API Baches Yucatán funcionando correctamente",
                    "version": "1.0.0"
                }))
            }),
        )
        .merge(protected)
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Endpoint no encontrado",
                    "message": "La ruta no existe en esta API"
                })),
            )
        })
}

// Misma regla de extracción Bearer que el middleware real
async fn stub_auth(request: Request<Body>, next: Next) -> Result<Response, Response> {
    let has_bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("Bearer ") && value.len() > 7)
        .unwrap_or(false);

    if !has_bearer {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "No autenticado",
                "message": "No se proporcionó token de autenticación"
            })),
        )
            .into_response());
    }

    Ok(next.run(request).await)
}

async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
