//! Domain layer for the delivery trip service.
//!
//! This crate provides:
//! - Aggregate and DomainEvent traits
//! - The Trip aggregate with its stops and pieces, and the status machines
//!   that govern them
//! - A repository abstraction that serializes transitions per trip
//! - TripService, the entry point used by the HTTP layer

pub mod aggregate;
pub mod error;
pub mod repository;
pub mod seed;
pub mod trip;

pub use aggregate::{Aggregate, DomainEvent};
pub use error::DomainError;
pub use repository::{CommandResult, InMemoryTripRepository, RecordedEvent, TripRepository};
pub use seed::{SAMPLE_TRIP_NUMBER, sample_trip, sample_trips};
pub use trip::{
    Address, DeliverPiece, DeliveryStartedData, FinishTrip, Piece, PieceDeliveredData,
    PieceStatus, StartDelivery, Stop, Trip, TripError, TripEvent, TripFinishedData, TripService,
    TripStatus,
};
