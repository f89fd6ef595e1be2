//! HTTP API server for the delivery trip service.
//!
//! Provides REST endpoints for trips, their stops and pieces, with structured
//! logging (tracing) and Prometheus metrics. Optionally serves the courier UI
//! as static files.

pub mod config;
pub mod error;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::{TripRepository, TripService};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use routes::trips::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// When `app_sources` is given, unmatched paths are served from that
/// directory.
pub fn create_app<R: TripRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
    app_sources: Option<&Path>,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let router = Router::new()
        .route("/health", get(routes::health::check::<R>))
        .route("/trips", get(routes::trips::list::<R>))
        .route(
            "/trips/{id}",
            get(routes::trips::get::<R>)
                .patch(routes::trips::update::<R>)
                .post(routes::trips::update::<R>),
        )
        .route(
            "/trips/{id}/pieces/{piece_id}",
            get(routes::trips::get_piece::<R>)
                .patch(routes::trips::update_piece::<R>)
                .post(routes::trips::update_piece::<R>),
        )
        .route(
            "/trips/{id}/stops/{stop_number}",
            get(routes::trips::get_stop::<R>),
        )
        .route("/trips/{id}/events", get(routes::trips::events::<R>))
        .route("/reset", get(routes::trips::reset::<R>))
        .with_state(state)
        .merge(metrics_router);

    let router = match app_sources {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around the given repository.
pub fn create_default_state<R: TripRepository + 'static>(repository: R) -> Arc<AppState<R>> {
    Arc::new(AppState {
        trip_service: TripService::new(repository),
    })
}
