//! Identifier types shared across the delivery trip workspace.

mod types;

pub use types::{PieceId, TripNumber};
