//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::TripRepository;
use serde::Serialize;

use super::trips::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Number of trips currently loaded.
    pub trips: usize,
}

/// GET /health — returns service health and the number of loaded trips.
pub async fn check<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<HealthResponse> {
    let trips = state.trip_service.list_trips().await.len();
    Json(HealthResponse { status: "ok", trips })
}
