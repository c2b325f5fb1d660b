//! Route identifier type.

use std::fmt;

use super::DomainError;

/// Identifier of a persisted route.
///
/// Route ids are opaque strings assigned by the backend. They also key the
/// map overlays drawn for that route. The only validation is that they are
/// non-empty.
///
/// # Examples
///
/// ```
/// use trip_replay::domain::RouteId;
///
/// let id = RouteId::new("65a1f0c2".to_string()).unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2");
///
/// // Empty strings are rejected
/// assert!(RouteId::new("".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteId(String);

impl RouteId {
    /// Create a route id from a string.
    ///
    /// Returns an error if the string is empty.
    pub fn new(s: String) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::EmptyRouteId);
        }
        Ok(RouteId(s))
    }

    /// Placeholder id for directions that are previewed but not yet persisted.
    pub fn draft() -> Self {
        RouteId("0".to_string())
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the RouteId and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid_id() {
        assert!(RouteId::new("1".to_string()).is_ok());
        assert!(RouteId::new("65a1f0c2e4b0a1b2c3d4e5f6".to_string()).is_ok());
        assert!(RouteId::new("route-with-dashes".to_string()).is_ok());
    }

    #[test]
    fn new_empty_rejected() {
        assert_eq!(
            RouteId::new(String::new()),
            Err(DomainError::EmptyRouteId)
        );
    }

    #[test]
    fn draft_id() {
        assert_eq!(RouteId::draft().as_str(), "0");
    }

    #[test]
    fn display_and_debug() {
        let id = RouteId::new("abc".to_string()).unwrap();
        assert_eq!(format!("{}", id), "abc");
        assert_eq!(format!("{:?}", id), "RouteId(abc)");
        assert_eq!(id.into_inner(), "abc");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-empty string is a valid id and round-trips
        #[test]
        fn non_empty_roundtrip(s in ".{1,40}") {
            let id = RouteId::new(s.clone()).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
