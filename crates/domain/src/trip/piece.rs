//! Piece entity.

use common::PieceId;
use serde::{Deserialize, Serialize};

use super::PieceStatus;

/// A single parcel carried on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    id: PieceId,
    receiver_name: String,
    shipment_number: i64,
    status: PieceStatus,

    /// Name of the person who signed for the piece; only present once delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signee: Option<String>,
}

impl Piece {
    /// Creates a sorted piece that has not left the depot yet.
    pub fn new(
        id: impl Into<PieceId>,
        receiver_name: impl Into<String>,
        shipment_number: i64,
    ) -> Self {
        Self {
            id: id.into(),
            receiver_name: receiver_name.into(),
            shipment_number,
            status: PieceStatus::Sorted,
            signee: None,
        }
    }

    pub fn id(&self) -> &PieceId {
        &self.id
    }

    pub fn receiver_name(&self) -> &str {
        &self.receiver_name
    }

    /// Several pieces can belong to the same shipment.
    pub fn shipment_number(&self) -> i64 {
        self.shipment_number
    }

    pub fn status(&self) -> PieceStatus {
        self.status
    }

    pub fn signee(&self) -> Option<&str> {
        self.signee.as_deref()
    }

    /// Marks the piece as delivered and signed for by `signee`.
    ///
    /// There is no precondition on the current status: a courier may hand
    /// over a piece out of band, and a repeated call replaces the signee.
    pub fn mark_delivered(&mut self, signee: impl Into<String>) {
        self.status = PieceStatus::Delivered;
        self.signee = Some(signee.into());
    }

    pub(crate) fn set_status(&mut self, status: PieceStatus) {
        self.status = status;
    }
}
