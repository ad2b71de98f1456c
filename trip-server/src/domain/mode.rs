//! Transport mode type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The mode of transport used by a trip candidate.
///
/// Serialized as the lowercase mode name (`"train"`, `"flight"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Train,
    Flight,
    Bus,
    Car,
    Ferry,
}

impl TransportMode {
    /// All modes, in display order.
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Train,
        TransportMode::Flight,
        TransportMode::Bus,
        TransportMode::Car,
        TransportMode::Ferry,
    ];

    /// Returns the lowercase mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Train => "train",
            TransportMode::Flight => "flight",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Ferry => "ferry",
        }
    }

    /// Returns true for flight-mode candidates.
    pub fn is_flight(&self) -> bool {
        matches!(self, TransportMode::Flight)
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
