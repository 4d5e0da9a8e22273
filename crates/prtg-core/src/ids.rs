//! Strongly-typed object identifiers.
//!
//! Every object in a PRTG instance (probe, group, device, sensor) lives in a
//! single numeric id space. [`ObjectId`] wraps that number so ids are not
//! confused with other integers at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Numeric identifier of a PRTG object.
///
/// Id `0` is the root group of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// The root group of a PRTG instance.
    pub const ROOT: Self = Self(0);

    /// Creates an object id from its numeric value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses an object id from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the string is not a non-negative
    /// decimal number.
    pub fn parse_str(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::InvalidRequest(format!("invalid object id `{input}`")))
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
