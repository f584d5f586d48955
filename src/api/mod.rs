pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, invoice::InvoiceRenderer, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let invoice_renderer = Arc::new(InvoiceRenderer::new(settings.hotel.clone()));
    let app_state = AppState::new(service_context, invoice_renderer, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // API routes
        .nest("/api", api_routes(app_state.clone()))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Open routes
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/rooms", get(handlers::rooms::list))
        .route("/rooms/:id", get(handlers::rooms::get))
        // Session-protected routes
        .merge(protected_routes(state))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(handlers::auth::current_user))
        .route("/bookings", post(handlers::bookings::create))
        .route("/bookings", get(handlers::bookings::list))
        .route("/bookings/:id", get(handlers::bookings::get))
        .route("/payment", post(handlers::payments::pay))
        .route("/invoice/:booking_id", get(handlers::invoices::get))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}
