//! Trip commands.

use common::{PieceId, TripNumber};

/// Command to send a trip out for delivery.
#[derive(Debug, Clone)]
pub struct StartDelivery {
    pub trip_number: TripNumber,
}

impl StartDelivery {
    pub fn new(trip_number: impl Into<TripNumber>) -> Self {
        Self {
            trip_number: trip_number.into(),
        }
    }
}

/// Command to close a trip when the courier is back at the depot.
#[derive(Debug, Clone)]
pub struct FinishTrip {
    pub trip_number: TripNumber,
}

impl FinishTrip {
    pub fn new(trip_number: impl Into<TripNumber>) -> Self {
        Self {
            trip_number: trip_number.into(),
        }
    }
}

/// Command to record that a piece was handed over.
#[derive(Debug, Clone)]
pub struct DeliverPiece {
    /// The trip carrying the piece.
    pub trip_number: TripNumber,

    /// The piece that was handed over.
    pub piece_id: PieceId,

    /// Name of the person who signed for it.
    pub signee: String,
}

impl DeliverPiece {
    pub fn new(
        trip_number: impl Into<TripNumber>,
        piece_id: impl Into<PieceId>,
        signee: impl Into<String>,
    ) -> Self {
        Self {
            trip_number: trip_number.into(),
            piece_id: piece_id.into(),
            signee: signee.into(),
        }
    }
}
