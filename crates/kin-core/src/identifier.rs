//! Person identifier management
//!
//! This module provides the [`PersonId`] type, a compact sequential
//! identifier with a stable textual form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`PersonId`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid person id `{0}`: expected `P` followed by digits")]
pub struct ParseIdError(String);

/// Sequential person identifier.
///
/// Identifiers are allocated from a monotonic counter and never reused
/// within a session. The canonical textual form is `P` followed by a
/// zero-padded sequence number, e.g. `P0001`. Padding is four digits and
/// widens naturally once the counter passes `9999`.
///
/// # Examples
///
/// ```
/// use kin_core::identifier::PersonId;
///
/// let id = PersonId::new(7);
/// assert_eq!(id.to_string(), "P0007");
///
/// let parsed: PersonId = "P0007".parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct PersonId(u32);

impl PersonId {
    /// Creates a `PersonId` from its raw sequence number.
    pub fn new(seq: u32) -> Self {
        Self(seq)
    }

    /// Returns the raw sequence number behind this identifier.
    pub fn seq(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:04}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('P')
            .ok_or_else(|| ParseIdError(s.to_string()))?;
        if digits.is_empty() {
            return Err(ParseIdError(s.to_string()));
        }
        let seq = digits
            .parse::<u32>()
            .map_err(|_| ParseIdError(s.to_string()))?;
        Ok(Self(seq))
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PersonId {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
