//! Trip, piece and stop endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use common::{PieceId, TripNumber};
use domain::{
    DeliverPiece, FinishTrip, Piece, RecordedEvent, StartDelivery, Stop, Trip, TripRepository,
    TripService,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, PIECE_NOT_FOUND, STOP_NOT_FOUND};

/// Shared application state accessible from all handlers.
pub struct AppState<R: TripRepository> {
    pub trip_service: TripService<R>,
}

// -- Request types --

/// Body of the trip and piece update endpoints.
#[derive(Debug, Deserialize)]
pub struct PatchRequest {
    pub operation: String,
    #[serde(default)]
    pub signee: Option<String>,
}

/// Operations accepted by `PATCH /trips/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripOperation {
    StartDelivery,
    Finish,
}

impl FromStr for TripOperation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start delivery" => Ok(TripOperation::StartDelivery),
            "finish" => Ok(TripOperation::Finish),
            _ => Err(ApiError::unknown_operation()),
        }
    }
}

/// Operations accepted by `PATCH /trips/{id}/pieces/{piece_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOperation {
    Delivered,
}

impl FromStr for PieceOperation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivered" => Ok(PieceOperation::Delivered),
            _ => Err(ApiError::unknown_operation()),
        }
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
    pub trips: usize,
}

// -- Handlers --

/// GET /trips — list the numbers of all trips.
#[tracing::instrument(skip(state))]
pub async fn list<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<Vec<TripNumber>> {
    Json(state.trip_service.list_trips().await)
}

/// GET /trips/{id} — load a full trip.
#[tracing::instrument(skip(state))]
pub async fn get<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    let trip = load_trip(&state, &TripNumber::from(id)).await?;
    Ok(Json(trip))
}

/// PATCH|POST /trips/{id} — start delivery or finish the trip.
#[tracing::instrument(skip(state, payload))]
pub async fn update<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> Result<Json<Trip>, ApiError> {
    let trip_number = TripNumber::from(id);
    load_trip(&state, &trip_number).await?;

    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = match request.operation.parse::<TripOperation>()? {
        TripOperation::StartDelivery => {
            state
                .trip_service
                .start_delivery(StartDelivery::new(trip_number))
                .await?
        }
        TripOperation::Finish => {
            state
                .trip_service
                .finish_trip(FinishTrip::new(trip_number))
                .await?
        }
    };

    Ok(Json(result.trip))
}

/// GET /trips/{id}/pieces/{piece_id} — look up a single piece.
#[tracing::instrument(skip(state))]
pub async fn get_piece<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path((id, piece_id)): Path<(String, String)>,
) -> Result<Json<Piece>, ApiError> {
    let piece = state
        .trip_service
        .get_piece(&TripNumber::from(id), &PieceId::from(piece_id))
        .await?
        .ok_or_else(|| ApiError::NotFound(PIECE_NOT_FOUND.to_string()))?;
    Ok(Json(piece))
}

/// PATCH|POST /trips/{id}/pieces/{piece_id} — mark a piece delivered.
///
/// Responds with the whole trip so the client can refresh its view.
#[tracing::instrument(skip(state, payload))]
pub async fn update_piece<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path((id, piece_id)): Path<(String, String)>,
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> Result<Json<Trip>, ApiError> {
    let trip_number = TripNumber::from(id);
    let piece_id = PieceId::from(piece_id);
    state
        .trip_service
        .get_piece(&trip_number, &piece_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(PIECE_NOT_FOUND.to_string()))?;

    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    match request.operation.parse::<PieceOperation>()? {
        PieceOperation::Delivered => {
            let signee = request
                .signee
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| ApiError::BadRequest("signee is required".to_string()))?;

            let result = state
                .trip_service
                .deliver_piece(DeliverPiece::new(trip_number, piece_id, signee))
                .await?;
            Ok(Json(result.trip))
        }
    }
}

/// GET /trips/{id}/stops/{stop_number} — look up a stop by zero-based index.
#[tracing::instrument(skip(state))]
pub async fn get_stop<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path((id, stop_number)): Path<(String, String)>,
) -> Result<Json<Stop>, ApiError> {
    let trip_number = TripNumber::from(id);
    load_trip(&state, &trip_number).await?;

    let stop_number: i64 = stop_number
        .parse()
        .map_err(|_| ApiError::BadRequest("stop index must be a number".to_string()))?;

    let stop = state
        .trip_service
        .get_stop(&trip_number, stop_number)
        .await?
        .ok_or_else(|| ApiError::NotFound(STOP_NOT_FOUND.to_string()))?;
    Ok(Json(stop))
}

/// GET /trips/{id}/events — list the recorded transitions of a trip.
#[tracing::instrument(skip(state))]
pub async fn events<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RecordedEvent>>, ApiError> {
    let history = state.trip_service.history(&TripNumber::from(id)).await?;
    Ok(Json(history))
}

/// GET /reset — replace all trips with fresh sample data.
#[tracing::instrument(skip(state))]
pub async fn reset<R: TripRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<ResetResponse> {
    let trips = state.trip_service.reset().await;
    Json(ResetResponse {
        message: "trips reset",
        trips,
    })
}

async fn load_trip<R: TripRepository>(
    state: &AppState<R>,
    trip_number: &TripNumber,
) -> Result<Trip, ApiError> {
    state
        .trip_service
        .get_trip(trip_number)
        .await
        .ok_or_else(ApiError::trip_not_found)
}
