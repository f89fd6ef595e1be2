//! Sample trip used for demos and after a reset.

use common::TripNumber;

use crate::trip::{Address, Piece, Stop, Trip};

/// Trip number of the sample trip.
pub const SAMPLE_TRIP_NUMBER: &str = "744567";

/// Returns the trips installed at startup and on reset.
pub fn sample_trips() -> Vec<Trip> {
    vec![sample_trip(SAMPLE_TRIP_NUMBER)]
}

/// Builds the sample route through Utrecht and Bunnik: three stops carrying
/// two, one and one pieces, all still sorted.
pub fn sample_trip(trip_number: impl Into<TripNumber>) -> Trip {
    let biltstraat_7 = address(
        "NL3572AA000007X",
        "Biltstraat",
        "7",
        "3572AA",
        "Utrecht",
        (52.094944, 5.126964),
    );
    let biltstraat_451 = address(
        "NL3572AX000451X",
        "Biltstraat",
        "451",
        "3572AX",
        "Utrecht",
        (52.095425, 5.136621),
    );
    let runnenburg_21 = address(
        "NL3981AZ000021X",
        "Runnenburg",
        "21",
        "3981AZ",
        "Bunnik",
        (52.063972, 5.194597),
    );

    Trip::new(
        trip_number,
        vec![
            Stop::new(
                biltstraat_7,
                vec![
                    Piece::new("JVGL566684224", "Connie Plessen", 163549755),
                    Piece::new("JVGL566684225", "Connie Plessen", 163549755),
                ],
            ),
            Stop::new(
                biltstraat_451,
                vec![Piece::new("JVGL79984753", "Sjef Speciaal", 763249799)],
            ),
            Stop::new(
                runnenburg_21,
                vec![Piece::new("JVGL89861267", "Ronald Reigan", 497983327)],
            ),
        ],
    )
}

fn address(
    kix_code: &str,
    street: &str,
    house_number: &str,
    postal_code: &str,
    city: &str,
    (latitude, longitude): (f64, f64),
) -> Address {
    Address {
        kix_code: kix_code.to_string(),
        street: street.to_string(),
        house_number: house_number.to_string(),
        postal_code: postal_code.to_string(),
        city: city.to_string(),
        country: "Nederland".to_string(),
        latitude,
        longitude,
    }
}
