//! Trip domain events.

use chrono::{DateTime, Utc};
use common::PieceId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::PieceStatus;

/// Facts recorded when a trip or one of its pieces changes status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TripEvent {
    /// Courier left the depot; every piece went into delivery.
    DeliveryStarted(DeliveryStartedData),

    /// Courier returned; undelivered pieces went back to the depot.
    TripFinished(TripFinishedData),

    /// A piece was handed over and signed for.
    PieceDelivered(PieceDeliveredData),
}

impl DomainEvent for TripEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TripEvent::DeliveryStarted(_) => "DeliveryStarted",
            TripEvent::TripFinished(_) => "TripFinished",
            TripEvent::PieceDelivered(_) => "PieceDelivered",
        }
    }
}

/// Data for DeliveryStarted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStartedData {
    /// Number of pieces moved into delivery.
    pub pieces_in_delivery: usize,

    pub started_at: DateTime<Utc>,
}

/// Data for TripFinished event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripFinishedData {
    /// Pieces that were signed for during the trip.
    pub pieces_delivered: usize,

    /// Pieces still in the van, now returned to the depot.
    pub pieces_returned: usize,

    pub finished_at: DateTime<Utc>,
}

/// Data for PieceDelivered event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceDeliveredData {
    pub piece_id: PieceId,
    pub signee: String,

    /// Status of the piece before it was marked delivered.
    pub previous_status: PieceStatus,

    pub delivered_at: DateTime<Utc>,
}

// Constructor helpers
impl TripEvent {
    pub fn delivery_started(pieces_in_delivery: usize) -> Self {
        TripEvent::DeliveryStarted(DeliveryStartedData {
            pieces_in_delivery,
            started_at: Utc::now(),
        })
    }

    pub fn trip_finished(pieces_delivered: usize, pieces_returned: usize) -> Self {
        TripEvent::TripFinished(TripFinishedData {
            pieces_delivered,
            pieces_returned,
            finished_at: Utc::now(),
        })
    }

    pub fn piece_delivered(
        piece_id: PieceId,
        signee: impl Into<String>,
        previous_status: PieceStatus,
    ) -> Self {
        TripEvent::PieceDelivered(PieceDeliveredData {
            piece_id,
            signee: signee.into(),
            previous_status,
            delivered_at: Utc::now(),
        })
    }
}
