//! Domain error types.
//!
//! These errors represent invalid input records. They are raised while
//! the network is being built, before any search runs.

/// Domain-level errors for validation of station and route records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A station name was empty after normalization
    #[error("station name is empty")]
    EmptyStationName,

    /// A line identifier was blank
    #[error("line identifier is empty")]
    EmptyLineId,

    /// A route record cannot be placed in the network
    #[error("malformed route {from} - {to} on line {line:?}: {reason}")]
    MalformedRoute {
        from: String,
        to: String,
        line: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyStationName;
        assert_eq!(err.to_string(), "station name is empty");

        let err = DomainError::EmptyLineId;
        assert_eq!(err.to_string(), "line identifier is empty");

        let err = DomainError::MalformedRoute {
            from: "Saddar".into(),
            to: "Faizabad".into(),
            line: "R1".into(),
            reason: "distance must be non-negative, got -2".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed route Saddar - Faizabad on line \"R1\": distance must be non-negative, got -2"
        );
    }
}
