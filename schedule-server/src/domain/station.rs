//! Station and city value types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A provider-issued station or settlement code, e.g. `s9600213`.
///
/// Codes are non-empty ASCII alphanumeric strings (the provider prefixes
/// stations with `s` and settlements with `c`). This type guarantees any
/// value is valid by construction.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::StationCode;
///
/// let code = StationCode::parse("s9600213").unwrap();
/// assert_eq!(code.as_str(), "s9600213");
///
/// // Empty and whitespace-bearing strings are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("s96 0213").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be non-empty ASCII alphanumeric (underscores
    /// allowed).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InvalidStationCode {
                reason: "must be ASCII alphanumeric",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A city resolved from the station directory, unique by title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedCity {
    pub title: String,
}

/// A station resolved within a single city.
///
/// `title` is the display name with the city stripped out and is unique
/// within one resolution. Entries without a provider code cannot be used
/// to query segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStation {
    pub title: String,
    pub code: Option<StationCode>,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_code_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[a-z]?[0-9]{1,9}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_code_string()) {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Strings containing whitespace are always rejected
        #[test]
        fn whitespace_rejected(s in "[a-z0-9]{0,4}[ \t][a-z0-9]{0,4}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
