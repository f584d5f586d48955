use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use innkeep::{
    api,
    auth::AuthService,
    config::Settings,
    repository::{InMemoryBookingRepository, InMemoryRoomRepository, InMemoryUserRepository},
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeep=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting Innkeep server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(settings.auth.session_duration_hours));

    // Sweep expired sessions hourly; lookups also prune lazily.
    let sweeper = auth_service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match sweeper.cleanup_expired_sessions().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!("Removed {} expired sessions", removed),
                Err(e) => tracing::warn!("Session cleanup failed: {:?}", e),
            }
        }
    });

    // Initialize in-memory repositories; everything lives for the
    // process lifetime and is lost on restart.
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let room_repo = Arc::new(InMemoryRoomRepository::with_default_catalog());
    let booking_repo = Arc::new(InMemoryBookingRepository::new());

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        user_repo,
        room_repo,
        booking_repo,
        auth_service,
    ));

    let settings = Arc::new(settings);
    let app = api::create_app(service_context, settings.clone());

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
