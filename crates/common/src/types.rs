use serde::{Deserialize, Serialize};

/// Identity of a trip, as printed on the courier's route sheet (e.g. `"744567"`).
///
/// Trip numbers are opaque strings; leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripNumber(String);

impl TripNumber {
    /// Creates a trip number from any string-like value.
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Returns the trip number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TripNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TripNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TripNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TripNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Barcode of a single piece (parcel), unique within a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PieceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PieceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PieceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_number_preserves_leading_zeros() {
        let number = TripNumber::new("007");
        assert_eq!(number.as_str(), "007");
        assert_eq!(number.to_string(), "007");
    }

    #[test]
    fn trip_number_serializes_as_plain_string() {
        let number = TripNumber::from("744567");
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"744567\"");
    }

    #[test]
    fn piece_id_equality_is_exact() {
        assert_eq!(PieceId::from("JVGL566684224"), PieceId::new("JVGL566684224"));
        assert_ne!(PieceId::from("JVGL566684224"), PieceId::from("JVGL56668422"));
    }

    #[test]
    fn piece_id_deserializes_from_string() {
        let id: PieceId = serde_json::from_str("\"JVGL89861267\"").unwrap();
        assert_eq!(id.as_str(), "JVGL89861267");
    }
}
