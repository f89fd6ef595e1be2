//! Stop entity.

use serde::{Deserialize, Serialize};

use super::{Address, Piece};

/// One address on the route together with the pieces to drop there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    address: Address,
    pieces: Vec<Piece>,
}

impl Stop {
    pub fn new(address: Address, pieces: Vec<Piece>) -> Self {
        Self { address, pieces }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Pieces in hand-over order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }
}
