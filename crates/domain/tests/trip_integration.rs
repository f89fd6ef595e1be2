//! Integration tests for the Trip aggregate.
//!
//! These tests drive the trip lifecycle through the service and repository,
//! including rejected transitions and the recorded history.

use common::{PieceId, TripNumber};
use domain::{
    DeliverPiece, DomainError, FinishTrip, InMemoryTripRepository, PieceStatus,
    SAMPLE_TRIP_NUMBER, StartDelivery, Trip, TripError, TripEvent, TripService, TripStatus,
    sample_trip, sample_trips,
};

const SIGNED_PIECE: &str = "JVGL566684224";

/// Helper to create a test trip service with the sample trip loaded
fn create_service() -> TripService<InMemoryTripRepository> {
    TripService::new(InMemoryTripRepository::with_trips(sample_trips()))
}

fn trip_number() -> TripNumber {
    TripNumber::from(SAMPLE_TRIP_NUMBER)
}

fn piece_status(trip: &Trip, id: &str) -> PieceStatus {
    trip.find_piece(&PieceId::from(id)).unwrap().status()
}

mod trip_lifecycle {
    use super::*;

    #[tokio::test]
    async fn complete_trip_lifecycle() {
        let service = create_service();

        // Start delivery
        let result = service
            .start_delivery(StartDelivery::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap();
        assert_eq!(result.trip.status(), TripStatus::InDelivery);
        assert_eq!(result.trip.count_pieces(PieceStatus::InDelivery), 4);

        // Deliver one piece
        let result = service
            .deliver_piece(DeliverPiece::new(SAMPLE_TRIP_NUMBER, SIGNED_PIECE, "J. Doe"))
            .await
            .unwrap();
        let signed = result.trip.find_piece(&PieceId::from(SIGNED_PIECE)).unwrap();
        assert_eq!(signed.status(), PieceStatus::Delivered);
        assert_eq!(signed.signee(), Some("J. Doe"));
        assert_eq!(result.trip.count_pieces(PieceStatus::InDelivery), 3);

        // Finish
        let result = service
            .finish_trip(FinishTrip::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap();
        let trip = result.trip;
        assert_eq!(trip.status(), TripStatus::Finished);
        assert_eq!(piece_status(&trip, SIGNED_PIECE), PieceStatus::Delivered);
        for other in ["JVGL566684225", "JVGL79984753", "JVGL89861267"] {
            assert_eq!(piece_status(&trip, other), PieceStatus::ReturnedToDepot);
        }

        // Stored state matches what the last command returned
        let stored = service.get_trip(&trip_number()).await.unwrap();
        assert_eq!(stored, trip);
    }

    #[tokio::test]
    async fn history_records_each_transition() {
        let service = create_service();
        service
            .start_delivery(StartDelivery::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap();
        service
            .deliver_piece(DeliverPiece::new(SAMPLE_TRIP_NUMBER, SIGNED_PIECE, "J. Doe"))
            .await
            .unwrap();
        service
            .finish_trip(FinishTrip::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap();

        let history = service.history(&trip_number()).await.unwrap();
        let sequences: Vec<u64> = history.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);

        match &history[2].event {
            TripEvent::TripFinished(data) => {
                assert_eq!(data.pieces_delivered, 1);
                assert_eq!(data.pieces_returned, 3);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn delivering_twice_keeps_last_signee() {
        let service = create_service();
        service
            .deliver_piece(DeliverPiece::new(SAMPLE_TRIP_NUMBER, SIGNED_PIECE, "J. Doe"))
            .await
            .unwrap();
        let result = service
            .deliver_piece(DeliverPiece::new(SAMPLE_TRIP_NUMBER, SIGNED_PIECE, "M. Roe"))
            .await
            .unwrap();

        let piece = result.trip.find_piece(&PieceId::from(SIGNED_PIECE)).unwrap();
        assert_eq!(piece.signee(), Some("M. Roe"));
        assert_eq!(piece.status(), PieceStatus::Delivered);
    }
}

mod rejected_transitions {
    use super::*;

    #[tokio::test]
    async fn finish_ready_trip_requires_in_delivery() {
        let service = create_service();

        let err = service
            .finish_trip(FinishTrip::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::Trip(TripError::InvalidTransition {
                action: "finish trip",
                current: TripStatus::Ready,
                required: TripStatus::InDelivery,
            })
        );
        let trip = service.get_trip(&trip_number()).await.unwrap();
        assert_eq!(trip, sample_trip(SAMPLE_TRIP_NUMBER));
    }

    #[tokio::test]
    async fn start_delivery_twice_leaves_pieces_unchanged() {
        let service = create_service();
        service
            .start_delivery(StartDelivery::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap();
        service
            .deliver_piece(DeliverPiece::new(SAMPLE_TRIP_NUMBER, SIGNED_PIECE, "J. Doe"))
            .await
            .unwrap();
        let before = service.get_trip(&trip_number()).await.unwrap();

        let err = service
            .start_delivery(StartDelivery::new(SAMPLE_TRIP_NUMBER))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot start delivery of trip when it has state in delivery, state must be ready"
        );
        assert_eq!(service.get_trip(&trip_number()).await.unwrap(), before);
        assert_eq!(service.history(&trip_number()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn transitions_on_unknown_trip() {
        let service = create_service();
        let result = service.start_delivery(StartDelivery::new("999999")).await;
        assert!(matches!(result, Err(DomainError::TripNotFound { .. })));

        let result = service
            .deliver_piece(DeliverPiece::new("999999", SIGNED_PIECE, "J. Doe"))
            .await;
        assert!(matches!(result, Err(DomainError::TripNotFound { .. })));
    }
}

mod multiple_trips {
    use super::*;

    #[tokio::test]
    async fn trips_transition_independently() {
        let service = TripService::new(InMemoryTripRepository::with_trips([
            sample_trip("100001"),
            sample_trip("100002"),
        ]));

        service
            .start_delivery(StartDelivery::new("100001"))
            .await
            .unwrap();

        let first = service.get_trip(&TripNumber::from("100001")).await.unwrap();
        let second = service.get_trip(&TripNumber::from("100002")).await.unwrap();
        assert_eq!(first.status(), TripStatus::InDelivery);
        assert_eq!(second.status(), TripStatus::Ready);
        assert_eq!(second.count_pieces(PieceStatus::Sorted), 4);
    }
}
