//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A leg was built without any steps
    #[error("leg must have at least one step")]
    EmptyLeg,

    /// A route identifier was empty
    #[error("route id cannot be empty")]
    EmptyRouteId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::EmptyLeg.to_string(),
            "leg must have at least one step"
        );
        assert_eq!(
            DomainError::EmptyRouteId.to_string(),
            "route id cannot be empty"
        );
    }
}
