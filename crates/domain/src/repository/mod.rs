//! Trip storage abstraction.
//!
//! The repository is the unit of concurrency control: every transition runs
//! through [`TripRepository::execute`], which holds exclusive access to one
//! trip while the command runs and records the resulting events.

mod memory;

pub use memory::InMemoryTripRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::TripNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;
use crate::error::DomainError;
use crate::trip::{Trip, TripEvent};

/// A trip event as stored in the trip's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event_id: Uuid,
    pub trip_number: TripNumber,

    /// Position in the trip's history, starting at 1.
    pub sequence: u64,

    pub event_type: String,
    pub recorded_at: DateTime<Utc>,
    pub event: TripEvent,
}

impl RecordedEvent {
    pub fn new(trip_number: TripNumber, sequence: u64, event: TripEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            trip_number,
            sequence,
            event_type: event.event_type().to_string(),
            recorded_at: Utc::now(),
            event,
        }
    }
}

/// Result of command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The trip after the command was applied.
    pub trip: Trip,

    /// The events that were recorded.
    pub events: Vec<RecordedEvent>,
}

/// Storage for trips, keyed by trip number.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Returns the numbers of all stored trips, sorted.
    async fn trip_numbers(&self) -> Vec<TripNumber>;

    /// Returns a snapshot of the trip, or `None` if it is unknown.
    async fn get(&self, trip_number: &TripNumber) -> Option<Trip>;

    /// Returns the recorded events of a trip, oldest first.
    async fn history(&self, trip_number: &TripNumber) -> Option<Vec<RecordedEvent>>;

    /// Replaces every stored trip, discarding all history.
    async fn replace_all(&self, trips: Vec<Trip>);

    /// Runs `command` against the trip with exclusive access.
    ///
    /// The command sees a working copy; it is stored back only if the command
    /// succeeds, so an error leaves the trip and its history untouched.
    async fn execute<F>(
        &self,
        trip_number: &TripNumber,
        command: F,
    ) -> Result<CommandResult, DomainError>
    where
        F: FnOnce(&mut Trip) -> Result<Vec<TripEvent>, DomainError> + Send;
}
