//! Trip and piece status machines.

use serde::{Deserialize, Serialize};

/// The status of a trip in its lifecycle.
///
/// State transitions:
/// ```text
/// Ready ──(start delivery)──► InDelivery ──(finish)──► Finished
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TripStatus {
    /// Trip is loaded and waiting for the courier to depart.
    #[default]
    #[serde(rename = "ready")]
    Ready,

    /// Courier is on the road.
    #[serde(rename = "in delivery")]
    InDelivery,

    /// Courier is back at the depot (terminal state).
    #[serde(rename = "finished")]
    Finished,
}

impl TripStatus {
    /// Returns true if delivery can start in this status.
    pub fn can_start_delivery(&self) -> bool {
        matches!(self, TripStatus::Ready)
    }

    /// Returns true if the trip can be finished in this status.
    pub fn can_finish(&self) -> bool {
        matches!(self, TripStatus::InDelivery)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Finished)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Ready => "ready",
            TripStatus::InDelivery => "in delivery",
            TripStatus::Finished => "finished",
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status of a single piece.
///
/// ```text
/// Sorted ──► InDelivery ──┬──► Delivered
///                         └──► ReturnedToDepot
/// ```
///
/// Trip transitions move pieces in bulk; `Delivered` can additionally be
/// reached from any status when the courier reports a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PieceStatus {
    #[default]
    #[serde(rename = "sorted")]
    Sorted,

    #[serde(rename = "in delivery")]
    InDelivery,

    #[serde(rename = "delivered")]
    Delivered,

    #[serde(rename = "returned to depot")]
    ReturnedToDepot,
}

impl PieceStatus {
    /// Returns true if the piece is in the courier's van.
    pub fn is_in_delivery(&self) -> bool {
        matches!(self, PieceStatus::InDelivery)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceStatus::Sorted => "sorted",
            PieceStatus::InDelivery => "in delivery",
            PieceStatus::Delivered => "delivered",
            PieceStatus::ReturnedToDepot => "returned to depot",
        }
    }
}

impl std::fmt::Display for PieceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
