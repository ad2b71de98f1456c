//! Domain types for the trip planner.
//!
//! This module contains the core domain model types that represent
//! validated trip data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod candidate;
mod error;
mod leg;
mod mode;
mod preferences;

pub use candidate::{Candidate, CandidateRecord};
pub use error::DomainError;
pub use leg::{GeoPoint, Leg};
pub use mode::TransportMode;
pub use preferences::Preferences;
