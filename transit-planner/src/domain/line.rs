//! Line identifiers.

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// Identifier of a bus or rail line (e.g. "R1", "FR-4").
///
/// Surrounding whitespace is trimmed; the identifier is otherwise kept
/// verbatim and compared case-sensitively.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier, rejecting blank input.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyLineId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(LineId::new("  R1 ").unwrap().as_str(), "R1");
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(LineId::new(""), Err(DomainError::EmptyLineId));
        assert_eq!(LineId::new(" \t"), Err(DomainError::EmptyLineId));
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(LineId::new("r1").unwrap(), LineId::new("R1").unwrap());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", LineId::new("FR-4").unwrap()), "LineId(FR-4)");
    }
}
