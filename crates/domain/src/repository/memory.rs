//! In-memory trip repository.
//!
//! Suitable for a single process. Trips and their history are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::TripNumber;
use tokio::sync::RwLock;

use crate::aggregate::Aggregate;
use crate::error::DomainError;
use crate::trip::{Trip, TripEvent};

use super::{CommandResult, RecordedEvent, TripRepository};

#[derive(Debug, Clone)]
struct TripEntry {
    trip: Trip,
    history: Vec<RecordedEvent>,
}

impl TripEntry {
    fn new(trip: Trip) -> Self {
        Self {
            trip,
            history: Vec::new(),
        }
    }
}

/// In-memory trip repository.
///
/// All trips live behind one `RwLock`: reads share it, transitions take it
/// exclusively for the duration of a single command.
#[derive(Clone, Default)]
pub struct InMemoryTripRepository {
    trips: Arc<RwLock<HashMap<TripNumber, TripEntry>>>,
}

impl InMemoryTripRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with `trips`.
    pub fn with_trips(trips: impl IntoIterator<Item = Trip>) -> Self {
        let entries = trips
            .into_iter()
            .map(|trip| (trip.trip_number().clone(), TripEntry::new(trip)))
            .collect();
        Self {
            trips: Arc::new(RwLock::new(entries)),
        }
    }

    /// Returns the number of stored trips.
    pub async fn trip_count(&self) -> usize {
        self.trips.read().await.len()
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn trip_numbers(&self) -> Vec<TripNumber> {
        let trips = self.trips.read().await;
        let mut numbers: Vec<_> = trips.keys().cloned().collect();
        numbers.sort();
        numbers
    }

    async fn get(&self, trip_number: &TripNumber) -> Option<Trip> {
        let trips = self.trips.read().await;
        trips.get(trip_number).map(|entry| entry.trip.clone())
    }

    async fn history(&self, trip_number: &TripNumber) -> Option<Vec<RecordedEvent>> {
        let trips = self.trips.read().await;
        trips.get(trip_number).map(|entry| entry.history.clone())
    }

    async fn replace_all(&self, trips: Vec<Trip>) {
        let mut store = self.trips.write().await;
        store.clear();
        store.extend(
            trips
                .into_iter()
                .map(|trip| (trip.trip_number().clone(), TripEntry::new(trip))),
        );
    }

    async fn execute<F>(
        &self,
        trip_number: &TripNumber,
        command: F,
    ) -> Result<CommandResult, DomainError>
    where
        F: FnOnce(&mut Trip) -> Result<Vec<TripEvent>, DomainError> + Send,
    {
        let mut store = self.trips.write().await;
        let entry = store
            .get_mut(trip_number)
            .ok_or_else(|| DomainError::TripNotFound {
                trip_number: trip_number.clone(),
            })?;

        let mut trip = entry.trip.clone();
        let events = command(&mut trip)?;

        let mut sequence = entry.history.len() as u64;
        let recorded: Vec<RecordedEvent> = events
            .into_iter()
            .map(|event| {
                sequence += 1;
                RecordedEvent::new(trip_number.clone(), sequence, event)
            })
            .collect();

        tracing::debug!(
            aggregate = Trip::aggregate_type(),
            %trip_number,
            events = recorded.len(),
            "command applied"
        );

        entry.trip = trip.clone();
        entry.history.extend(recorded.iter().cloned());

        Ok(CommandResult {
            trip,
            events: recorded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{SAMPLE_TRIP_NUMBER, sample_trip};
    use crate::trip::{TripError, TripStatus};

    fn repository() -> InMemoryTripRepository {
        InMemoryTripRepository::with_trips([sample_trip(SAMPLE_TRIP_NUMBER)])
    }

    fn number() -> TripNumber {
        TripNumber::from(SAMPLE_TRIP_NUMBER)
    }

    #[tokio::test]
    async fn test_get_returns_snapshot() {
        let repo = repository();
        let trip = repo.get(&number()).await.unwrap();
        assert_eq!(trip.status(), TripStatus::Ready);
        assert!(repo.get(&TripNumber::from("000000")).await.is_none());
    }

    #[tokio::test]
    async fn test_trip_numbers_sorted() {
        let repo = InMemoryTripRepository::with_trips([
            sample_trip("900001"),
            sample_trip("100001"),
            sample_trip("500001"),
        ]);
        let numbers = repo.trip_numbers().await;
        assert_eq!(
            numbers,
            vec![
                TripNumber::from("100001"),
                TripNumber::from("500001"),
                TripNumber::from("900001"),
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_stores_trip_and_history() {
        let repo = repository();

        let result = repo
            .execute(&number(), |trip| Ok(vec![trip.start_delivery()?]))
            .await
            .unwrap();

        assert_eq!(result.trip.status(), TripStatus::InDelivery);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].sequence, 1);
        assert_eq!(result.events[0].event_type, "DeliveryStarted");

        let stored = repo.get(&number()).await.unwrap();
        assert_eq!(stored, result.trip);
        assert_eq!(repo.history(&number()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_error_leaves_trip_untouched() {
        let repo = repository();
        let before = repo.get(&number()).await.unwrap();

        let result = repo
            .execute(&number(), |trip| Ok(vec![trip.finish()?]))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Trip(TripError::InvalidTransition { .. }))
        ));
        assert_eq!(repo.get(&number()).await.unwrap(), before);
        assert!(repo.history(&number()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_unknown_trip() {
        let repo = repository();
        let result = repo
            .execute(&TripNumber::from("000000"), |trip| {
                Ok(vec![trip.start_delivery()?])
            })
            .await;
        assert!(matches!(result, Err(DomainError::TripNotFound { .. })));
    }

    #[tokio::test]
    async fn test_sequences_continue_across_commands() {
        let repo = repository();
        repo.execute(&number(), |trip| Ok(vec![trip.start_delivery()?]))
            .await
            .unwrap();
        let result = repo
            .execute(&number(), |trip| Ok(vec![trip.finish()?]))
            .await
            .unwrap();

        assert_eq!(result.events[0].sequence, 2);
        let history = repo.history(&number()).await.unwrap();
        let types: Vec<_> = history.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["DeliveryStarted", "TripFinished"]);
    }

    #[tokio::test]
    async fn test_replace_all_discards_history() {
        let repo = repository();
        repo.execute(&number(), |trip| Ok(vec![trip.start_delivery()?]))
            .await
            .unwrap();

        repo.replace_all(vec![sample_trip(SAMPLE_TRIP_NUMBER)]).await;

        assert_eq!(repo.trip_count().await, 1);
        let trip = repo.get(&number()).await.unwrap();
        assert_eq!(trip.status(), TripStatus::Ready);
        assert!(repo.history(&number()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_start_delivery_succeeds_once() {
        let repo = repository();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.execute(&number(), |trip| Ok(vec![trip.start_delivery()?]))
                    .await
                    .is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.history(&number()).await.unwrap().len(), 1);
    }
}
