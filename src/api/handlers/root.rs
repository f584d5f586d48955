use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Innkeep API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Hotel room booking service",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "rooms": "/api/rooms",
            "register": "/api/register",
            "login": "/api/login",
            "bookings": "/api/bookings"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
