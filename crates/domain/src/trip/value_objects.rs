//! Value objects for the trip domain.

use serde::{Deserialize, Serialize};

/// Postal address of a stop.
///
/// Addresses are plain data; a [`Stop`](super::Stop) only hands out shared
/// references to its address, so it cannot change once the trip is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// KIX barcode identifying the delivery point (e.g. `NL3572AA000007X`).
    pub kix_code: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}
