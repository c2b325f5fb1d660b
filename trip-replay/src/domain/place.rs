//! Place lookup results.

use super::GeoPoint;

/// A candidate returned by a text-based place lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Provider place identifier.
    pub place_id: String,

    pub location: Option<GeoPoint>,

    pub formatted_address: Option<String>,
}
