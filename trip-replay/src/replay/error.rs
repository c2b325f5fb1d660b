//! Replay error types.

/// Errors from starting a replay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// No route was resolved, or the route has no step to replay
    #[error("no active route to replay")]
    NoActiveRoute,
}
