//! Route directions: the ordered legs of one computed route.

use super::{GeoPoint, Leg, Step};

/// Ordered legs of a route.
///
/// The directions provider may return several alternative routes; this type
/// holds a single one (the first). Every leg has at least one step, so a
/// non-empty `RouteDirections` always has a start and an end point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteDirections {
    legs: Vec<Leg>,
}

impl RouteDirections {
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// Directions with no legs (e.g. the provider found no route).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Overall start: the first leg's first step's start.
    pub fn start_point(&self) -> Option<GeoPoint> {
        self.legs.first().map(Leg::start_point)
    }

    /// Overall end: the last leg's last step's end.
    pub fn end_point(&self) -> Option<GeoPoint> {
        self.legs.last().map(Leg::end_point)
    }

    /// Total number of steps across all legs.
    pub fn step_count(&self) -> usize {
        self.legs.iter().map(|leg| leg.steps().len()).sum()
    }

    /// Iterate over every step in leg-then-step order.
    ///
    /// Yields `(leg_index, step_index, step)`.
    pub fn steps(&self) -> impl Iterator<Item = (usize, usize, &Step)> {
        self.legs.iter().enumerate().flat_map(|(leg_idx, leg)| {
            leg.steps()
                .iter()
                .enumerate()
                .map(move |(step_idx, step)| (leg_idx, step_idx, step))
        })
    }

    /// Start address of the first leg, if known.
    pub fn start_address(&self) -> Option<&str> {
        self.legs.first().and_then(|l| l.start_address.as_deref())
    }

    /// End address of the last leg, if known.
    pub fn end_address(&self) -> Option<&str> {
        self.legs.last().and_then(|l| l.end_address.as_deref())
    }
}
