//! Trip service providing the operations the delivery API exposes.

use common::{PieceId, TripNumber};

use crate::error::DomainError;
use crate::repository::{CommandResult, RecordedEvent, TripRepository};
use crate::seed;

use super::{DeliverPiece, FinishTrip, Piece, StartDelivery, Stop, Trip};

/// Service for managing trips.
///
/// Wraps a [`TripRepository`] so that every transition runs as one command
/// under the repository's exclusive access, and adds logging and metrics.
pub struct TripService<R: TripRepository> {
    repository: R,
}

impl<R: TripRepository> TripService<R> {
    /// Creates a new trip service on top of the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the numbers of all known trips.
    pub async fn list_trips(&self) -> Vec<TripNumber> {
        self.repository.trip_numbers().await
    }

    /// Loads a trip by number. Returns None if the trip doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_trip(&self, trip_number: &TripNumber) -> Option<Trip> {
        self.repository.get(trip_number).await
    }

    /// Looks up a piece on a trip.
    ///
    /// A missing trip is an error; a missing piece is `Ok(None)`.
    #[tracing::instrument(skip(self))]
    pub async fn get_piece(
        &self,
        trip_number: &TripNumber,
        piece_id: &PieceId,
    ) -> Result<Option<Piece>, DomainError> {
        let trip = self.load(trip_number).await?;
        Ok(trip.find_piece(piece_id).cloned())
    }

    /// Looks up a stop by zero-based position.
    ///
    /// A missing trip is an error; an out-of-range position is `Ok(None)`.
    #[tracing::instrument(skip(self))]
    pub async fn get_stop(
        &self,
        trip_number: &TripNumber,
        stop_number: i64,
    ) -> Result<Option<Stop>, DomainError> {
        let trip = self.load(trip_number).await?;
        Ok(trip.find_stop(stop_number).cloned())
    }

    /// Returns the transition history of a trip.
    #[tracing::instrument(skip(self))]
    pub async fn history(
        &self,
        trip_number: &TripNumber,
    ) -> Result<Vec<RecordedEvent>, DomainError> {
        self.repository
            .history(trip_number)
            .await
            .ok_or_else(|| DomainError::TripNotFound {
                trip_number: trip_number.clone(),
            })
    }

    /// Sends a trip out for delivery.
    #[tracing::instrument(skip(self))]
    pub async fn start_delivery(
        &self,
        cmd: StartDelivery,
    ) -> Result<CommandResult, DomainError> {
        let result = self
            .repository
            .execute(&cmd.trip_number, |trip| Ok(vec![trip.start_delivery()?]))
            .await;
        record_transition("start_delivery", &cmd.trip_number, &result);
        result
    }

    /// Finishes a trip, returning undelivered pieces to the depot.
    #[tracing::instrument(skip(self))]
    pub async fn finish_trip(&self, cmd: FinishTrip) -> Result<CommandResult, DomainError> {
        let result = self
            .repository
            .execute(&cmd.trip_number, |trip| Ok(vec![trip.finish()?]))
            .await;
        record_transition("finish", &cmd.trip_number, &result);
        result
    }

    /// Marks a single piece as delivered.
    #[tracing::instrument(
        skip(self, cmd),
        fields(trip_number = %cmd.trip_number, piece_id = %cmd.piece_id)
    )]
    pub async fn deliver_piece(&self, cmd: DeliverPiece) -> Result<CommandResult, DomainError> {
        let DeliverPiece {
            trip_number,
            piece_id,
            signee,
        } = cmd;

        let result = self
            .repository
            .execute(&trip_number, |trip| {
                let event = trip.deliver_piece(&piece_id, signee).ok_or_else(|| {
                    DomainError::PieceNotFound {
                        trip_number: trip.trip_number().clone(),
                        piece_id: piece_id.clone(),
                    }
                })?;
                Ok(vec![event])
            })
            .await;

        if result.is_ok() {
            metrics::counter!("pieces_delivered_total").increment(1);
            tracing::info!(%trip_number, %piece_id, "piece delivered");
        }
        result
    }

    /// Replaces all trips with freshly seeded sample trips.
    ///
    /// Returns the number of trips now stored.
    #[tracing::instrument(skip(self))]
    pub async fn reset(&self) -> usize {
        let trips = seed::sample_trips();
        let count = trips.len();
        self.repository.replace_all(trips).await;

        metrics::counter!("trip_resets_total").increment(1);
        tracing::info!(trips = count, "trips reset to sample data");
        count
    }

    async fn load(&self, trip_number: &TripNumber) -> Result<Trip, DomainError> {
        self.repository
            .get(trip_number)
            .await
            .ok_or_else(|| DomainError::TripNotFound {
                trip_number: trip_number.clone(),
            })
    }
}

fn record_transition(
    transition: &'static str,
    trip_number: &TripNumber,
    result: &Result<CommandResult, DomainError>,
) {
    match result {
        Ok(outcome) => {
            metrics::counter!("trip_transitions_total", "transition" => transition).increment(1);
            tracing::info!(
                %trip_number,
                transition,
                status = %outcome.trip.status(),
                pieces = outcome.trip.piece_count(),
                "trip transition applied"
            );
        }
        Err(DomainError::Trip(err)) => {
            metrics::counter!("trip_transitions_rejected_total", "transition" => transition)
                .increment(1);
            tracing::warn!(%trip_number, transition, error = %err, "trip transition rejected");
        }
        Err(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTripRepository;
    use crate::seed::SAMPLE_TRIP_NUMBER;
    use crate::trip::{PieceStatus, TripStatus};

    fn service() -> TripService<InMemoryTripRepository> {
        TripService::new(InMemoryTripRepository::with_trips(seed::sample_trips()))
    }

    #[tokio::test]
    async fn test_list_trips() {
        let service = service();
        assert_eq!(
            service.list_trips().await,
            vec![TripNumber::from(SAMPLE_TRIP_NUMBER)]
        );
    }

    #[tokio::test]
    async fn test_get_piece_distinguishes_missing_trip_and_piece() {
        let service = service();
        let trip = TripNumber::from(SAMPLE_TRIP_NUMBER);

        let piece = service
            .get_piece(&trip, &PieceId::from("JVGL79984753"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(piece.receiver_name(), "Sjef Speciaal");

        assert!(
            service
                .get_piece(&trip, &PieceId::from("JVGL7998475"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(matches!(
            service
                .get_piece(&TripNumber::from("1"), &PieceId::from("JVGL79984753"))
                .await,
            Err(DomainError::TripNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_stop_out_of_range_is_none() {
        let service = service();
        let trip = TripNumber::from(SAMPLE_TRIP_NUMBER);
        assert!(service.get_stop(&trip, 2).await.unwrap().is_some());
        assert!(service.get_stop(&trip, 3).await.unwrap().is_none());
        assert!(service.get_stop(&trip, -1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deliver_missing_piece() {
        let service = service();
        let result = service
            .deliver_piece(DeliverPiece::new(SAMPLE_TRIP_NUMBER, "UNKNOWN", "J. Doe"))
            .await;
        assert!(matches!(result, Err(DomainError::PieceNotFound { .. })));
        assert!(
            service
                .history(&TripNumber::from(SAMPLE_TRIP_NUMBER))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_reset_restores_sample_trip() {
        let service = service();
        let trip = TripNumber::from(SAMPLE_TRIP_NUMBER);
        service
            .start_delivery(StartDelivery::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap();

        assert_eq!(service.reset().await, 1);

        let restored = service.get_trip(&trip).await.unwrap();
        assert_eq!(restored.status(), TripStatus::Ready);
        assert_eq!(restored.count_pieces(PieceStatus::Sorted), 4);
        assert!(service.history(&trip).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_of_unknown_trip() {
        let service = service();
        assert!(matches!(
            service.history(&TripNumber::from("nope")).await,
            Err(DomainError::TripNotFound { .. })
        ));
    }
}
