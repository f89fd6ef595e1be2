//! Trip aggregate implementation.

use common::{PieceId, TripNumber};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;

use super::{Piece, PieceStatus, Stop, TripError, TripEvent, TripStatus};

/// Trip aggregate root.
///
/// A courier route: an ordered list of stops, each with the pieces to hand
/// over there. The trip owns every stop and piece; pieces are only reachable
/// through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    trip_number: TripNumber,

    /// Stops in visit order.
    stops: Vec<Stop>,

    status: TripStatus,
}

impl Aggregate for Trip {
    type Id = TripNumber;
    type Event = TripEvent;

    fn aggregate_type() -> &'static str {
        "Trip"
    }

    fn id(&self) -> &TripNumber {
        &self.trip_number
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            TripEvent::DeliveryStarted(_) => {
                for piece in self.pieces_mut() {
                    piece.set_status(PieceStatus::InDelivery);
                }
                self.status = TripStatus::InDelivery;
            }
            TripEvent::TripFinished(_) => {
                for piece in self.pieces_mut().filter(|p| p.status().is_in_delivery()) {
                    piece.set_status(PieceStatus::ReturnedToDepot);
                }
                self.status = TripStatus::Finished;
            }
            TripEvent::PieceDelivered(data) => {
                if let Some(piece) = self.find_piece_mut(&data.piece_id) {
                    piece.mark_delivered(data.signee);
                }
            }
        }
    }
}

// Query methods
impl Trip {
    /// Creates a trip that is ready to leave the depot.
    pub fn new(trip_number: impl Into<TripNumber>, stops: Vec<Stop>) -> Self {
        Self {
            trip_number: trip_number.into(),
            stops,
            status: TripStatus::Ready,
        }
    }

    pub fn trip_number(&self) -> &TripNumber {
        &self.trip_number
    }

    pub fn status(&self) -> TripStatus {
        self.status
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns every piece on the trip, stop by stop.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.stops.iter().flat_map(|stop| stop.pieces().iter())
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Counts the pieces currently in `status`.
    pub fn count_pieces(&self, status: PieceStatus) -> usize {
        self.pieces().filter(|p| p.status() == status).count()
    }

    /// Returns the first piece with the given id.
    pub fn find_piece(&self, piece_id: &PieceId) -> Option<&Piece> {
        self.pieces().find(|p| p.id() == piece_id)
    }

    /// Mutable variant of [`find_piece`](Self::find_piece); changes made
    /// through the returned piece are changes to this trip.
    pub fn find_piece_mut(&mut self, piece_id: &PieceId) -> Option<&mut Piece> {
        self.pieces_mut().find(|p| p.id() == piece_id)
    }

    /// Returns the stop at zero-based position `stop_number`.
    ///
    /// Negative and out-of-range positions yield `None`.
    pub fn find_stop(&self, stop_number: i64) -> Option<&Stop> {
        usize::try_from(stop_number)
            .ok()
            .and_then(|index| self.stops.get(index))
    }

    fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.stops.iter_mut().flat_map(|stop| stop.pieces_mut())
    }
}

// Transition methods (validate, then apply the resulting event)
impl Trip {
    /// Sends the courier out: the trip and all of its pieces go into delivery.
    ///
    /// Every piece is overwritten regardless of its current status.
    pub fn start_delivery(&mut self) -> Result<TripEvent, TripError> {
        if !self.status.can_start_delivery() {
            return Err(TripError::InvalidTransition {
                action: "start delivery of trip",
                current: self.status,
                required: TripStatus::Ready,
            });
        }

        let event = TripEvent::delivery_started(self.piece_count());
        self.apply(event.clone());
        Ok(event)
    }

    /// Brings the courier back: pieces still in delivery return to the depot,
    /// delivered pieces stay delivered.
    pub fn finish(&mut self) -> Result<TripEvent, TripError> {
        if !self.status.can_finish() {
            return Err(TripError::InvalidTransition {
                action: "finish trip",
                current: self.status,
                required: TripStatus::InDelivery,
            });
        }

        let event = TripEvent::trip_finished(
            self.count_pieces(PieceStatus::Delivered),
            self.count_pieces(PieceStatus::InDelivery),
        );
        self.apply(event.clone());
        Ok(event)
    }

    /// Marks a piece as delivered to `signee`.
    ///
    /// Returns `None` when no piece on this trip has the given id. The trip's
    /// own status is not consulted.
    pub fn deliver_piece(
        &mut self,
        piece_id: &PieceId,
        signee: impl Into<String>,
    ) -> Option<TripEvent> {
        let previous_status = self.find_piece(piece_id)?.status();
        let event = TripEvent::piece_delivered(piece_id.clone(), signee, previous_status);
        self.apply(event.clone());
        Some(event)
    }
}
