//! Trip aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod piece;
mod service;
mod status;
mod stop;
mod value_objects;

pub use aggregate::Trip;
pub use commands::{DeliverPiece, FinishTrip, StartDelivery};
pub use events::{DeliveryStartedData, PieceDeliveredData, TripEvent, TripFinishedData};
pub use piece::Piece;
pub use service::TripService;
pub use status::{PieceStatus, TripStatus};
pub use stop::Stop;
pub use value_objects::Address;

use thiserror::Error;

/// Errors that can occur during trip transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    /// Trip is not in the status the transition requires.
    #[error("cannot {action} when it has state {current}, state must be {required}")]
    InvalidTransition {
        action: &'static str,
        current: TripStatus,
        required: TripStatus,
    },
}
