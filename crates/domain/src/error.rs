//! Domain error types.

use common::{PieceId, TripNumber};
use thiserror::Error;

use crate::trip::TripError;

/// Errors that can occur during domain operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A trip transition was rejected.
    #[error(transparent)]
    Trip(#[from] TripError),

    /// No trip with this number is known.
    #[error("Trip not found: {trip_number}")]
    TripNotFound { trip_number: TripNumber },

    /// The trip exists but carries no piece with this id.
    #[error("Piece {piece_id} not found on trip {trip_number}")]
    PieceNotFound {
        trip_number: TripNumber,
        piece_id: PieceId,
    },
}
