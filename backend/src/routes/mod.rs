//! Route definitions for the Amar Foshol backend

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - weather and advisory generation
        .nest("/weather", weather_routes())
        // Protected routes - advisory history
        .nest("/advisories", advisory_routes())
        // Protected routes - crop batches
        .nest("/batches", batch_routes())
        // Protected routes - crop risk checks
        .nest("/risk", risk_routes())
        // Protected routes - loss prevention scores
        .nest("/loss-prevention", loss_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Weather routes (protected)
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(handlers::get_forecast))
        .route("/forecast/district", get(handlers::get_forecast_for_district))
        .route("/advisories", get(handlers::get_advisories))
        .route("/locations", get(handlers::list_locations))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Advisory history routes (protected)
fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/history",
            get(handlers::get_advisory_history).delete(handlers::clear_advisory_history),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Crop batch routes (protected)
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_batches).post(handlers::create_batch))
        .route(
            "/:batch_id",
            get(handlers::get_batch).put(handlers::update_batch),
        )
        .route("/:batch_id/status", put(handlers::change_batch_status))
        .route(
            "/:batch_id/interventions",
            get(handlers::list_interventions).post(handlers::add_intervention),
        )
        .route("/export/csv", get(handlers::export_batches_csv))
        .route("/export/json", get(handlers::export_batches_json))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Crop risk routes (protected)
fn risk_routes() -> Router<AppState> {
    Router::new()
        .route("/check", get(handlers::check_crop_risk))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Loss prevention routes (protected)
fn loss_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_monthly_summary))
        .route("/history", get(handlers::get_loss_history))
        .route_layer(middleware::from_fn(auth_middleware))
}
