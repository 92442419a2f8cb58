//! Station names and the name normalizer.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use super::DomainError;

/// Canonicalize free-text station input.
///
/// Runs of whitespace collapse to a single space, leading and trailing
/// whitespace is dropped, and every word is title-cased: a letter is
/// upper-cased when it does not follow another letter and lower-cased
/// otherwise. The same function must be applied to stored names and to
/// query input, or lookups will miss.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::normalize_name;
///
/// assert_eq!(normalize_name("  saddar   CHOWK "), "Saddar Chowk");
/// assert_eq!(normalize_name("mall-road"), "Mall-Road");
/// assert_eq!(normalize_name("   "), "");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }

        let mut after_letter = false;
        for c in word.chars() {
            if c.is_alphabetic() {
                if after_letter {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                after_letter = true;
            } else {
                out.push(c);
                after_letter = false;
            }
        }
    }

    out
}

/// A normalized, non-empty station name.
///
/// This is the vertex key of the transit graph. Any `StationName` value
/// is already in canonical form, so two names compare equal exactly when
/// they refer to the same station.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationName(String);

impl StationName {
    /// Normalize raw input into a station name.
    ///
    /// Fails if nothing is left after normalization.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let normalized = normalize_name(raw);
        if normalized.is_empty() {
            return Err(DomainError::EmptyStationName);
        }
        Ok(Self(normalized))
    }

    /// Returns the canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets maps keyed by `StationName` be queried with a plain `&str`.
impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalizing twice changes nothing
        #[test]
        fn idempotent(s in "[a-zA-Z0-9 \x27/\\-]{0,40}") {
            let once = normalize_name(&s);
            prop_assert_eq!(normalize_name(&once), once);
        }

        /// Output never has leading, trailing or doubled spaces
        #[test]
        fn whitespace_is_canonical(s in "[a-zA-Z \t\n]{0,40}") {
            let out = normalize_name(&s);
            prop_assert!(!out.starts_with(' '));
            prop_assert!(!out.ends_with(' '));
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains('\t'));
        }

        /// Case of the input never matters
        #[test]
        fn case_insensitive(s in "[a-zA-Z ]{0,40}") {
            prop_assert_eq!(normalize_name(&s.to_uppercase()), normalize_name(&s.to_lowercase()));
        }
    }
}
