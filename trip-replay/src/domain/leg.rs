//! Route leg type.
//!
//! A `Leg` is one origin-to-destination segment of an itinerary, made of
//! ordered steps.

use super::{DomainError, GeoPoint, Step};

/// A leg of a route.
///
/// # Invariants
///
/// - At least one step (checked at construction), so `start_point()` and
///   `end_point()` never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    steps: Vec<Step>,
    /// Human-readable address of the leg's start, as geocoded by the provider.
    pub start_address: Option<String>,
    /// Human-readable address of the leg's end.
    pub end_address: Option<String>,
}

impl Leg {
    /// Construct a leg from its steps.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyLeg`] if `steps` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_replay::domain::{GeoPoint, Leg, Step};
    ///
    /// let a = GeoPoint::new(0.0, 0.0);
    /// let b = GeoPoint::new(0.0, 1.0);
    /// let c = GeoPoint::new(1.0, 1.0);
    ///
    /// let leg = Leg::new(vec![Step::new(a, b, Some(30.0)), Step::new(b, c, None)]).unwrap();
    /// assert_eq!(leg.start_point(), a);
    /// assert_eq!(leg.end_point(), c);
    ///
    /// assert!(Leg::new(vec![]).is_err());
    /// ```
    pub fn new(steps: Vec<Step>) -> Result<Self, DomainError> {
        if steps.is_empty() {
            return Err(DomainError::EmptyLeg);
        }
        Ok(Self {
            steps,
            start_address: None,
            end_address: None,
        })
    }

    /// Attach start and end addresses.
    pub fn with_addresses(
        mut self,
        start_address: Option<String>,
        end_address: Option<String>,
    ) -> Self {
        self.start_address = start_address;
        self.end_address = end_address;
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The first step's start point.
    pub fn start_point(&self) -> GeoPoint {
        self.steps[0].start()
    }

    /// The last step's end point.
    pub fn end_point(&self) -> GeoPoint {
        self.steps[self.steps.len() - 1].end()
    }

    /// Sum of the known step durations, in seconds.
    ///
    /// Steps without duration data contribute nothing.
    pub fn duration_secs(&self) -> f64 {
        self.steps.iter().filter_map(Step::duration_secs).sum()
    }
}
