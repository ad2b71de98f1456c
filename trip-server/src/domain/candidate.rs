//! Trip candidate types.
//!
//! A `Candidate` is one proposed trip returned by the planning agent. It is
//! validated on construction (and on deserialization), so the scoring code
//! can rely on it having at least one leg and sane metric values.

use serde::{Deserialize, Serialize};

use super::{DomainError, Leg, TransportMode};

/// Unvalidated candidate data, in the wire shape used by the planning agent.
///
/// Convert into a [`Candidate`] with `Candidate::try_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub mode: TransportMode,
    pub legs: Vec<Leg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_eur: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
}

impl CandidateRecord {
    /// Creates a record with only a mode and legs; every metric absent.
    pub fn new(mode: TransportMode, legs: Vec<Leg>) -> Self {
        Self {
            id: None,
            mode,
            legs,
            price_eur: None,
            duration_min: None,
            co2_kg: None,
            transfers: None,
            score: None,
            eta: None,
        }
    }
}

/// A validated trip candidate.
///
/// # Invariants
///
/// - At least one leg
/// - `price_eur` and `co2_kg`, when present, are finite and non-negative
/// - `score`, when present, lies within `0.0..=1.0`
///
/// Candidates are immutable: the scoring code derives new values with
/// [`Candidate::with_score`] and [`Candidate::with_co2_kg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CandidateRecord", into = "CandidateRecord")]
pub struct Candidate {
    id: Option<String>,
    mode: TransportMode,
    legs: Vec<Leg>,
    price_eur: Option<f64>,
    duration_min: Option<u32>,
    co2_kg: Option<f64>,
    transfers: Option<u32>,
    score: Option<f64>,
    eta: Option<String>,
}

fn check_metric(field: &'static str, value: Option<f64>) -> Result<(), DomainError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(DomainError::InvalidMetric { field, value: v }),
        _ => Ok(()),
    }
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = DomainError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        if record.legs.is_empty() {
            return Err(DomainError::EmptyLegs);
        }
        for leg in &record.legs {
            leg.validate()?;
        }
        check_metric("price_eur", record.price_eur)?;
        check_metric("co2_kg", record.co2_kg)?;
        if let Some(score) = record.score {
            if !(0.0..=1.0).contains(&score) {
                return Err(DomainError::InvalidScore(score));
            }
        }

        Ok(Self {
            id: record.id,
            mode: record.mode,
            legs: record.legs,
            price_eur: record.price_eur,
            duration_min: record.duration_min,
            co2_kg: record.co2_kg,
            transfers: record.transfers,
            score: record.score,
            eta: record.eta,
        })
    }
}

impl From<Candidate> for CandidateRecord {
    fn from(c: Candidate) -> Self {
        Self {
            id: c.id,
            mode: c.mode,
            legs: c.legs,
            price_eur: c.price_eur,
            duration_min: c.duration_min,
            co2_kg: c.co2_kg,
            transfers: c.transfers,
            score: c.score,
            eta: c.eta,
        }
    }
}

impl Candidate {
    /// Creates a candidate with only a mode and legs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyLegs` if `legs` is empty.
    pub fn new(mode: TransportMode, legs: Vec<Leg>) -> Result<Self, DomainError> {
        Self::try_from(CandidateRecord::new(mode, legs))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// The first leg; its origin is the trip's origin.
    pub fn first_leg(&self) -> &Leg {
        // Invariant: legs is non-empty (checked in try_from)
        &self.legs[0]
    }

    /// The last leg; its destination is the trip's destination.
    pub fn last_leg(&self) -> &Leg {
        &self.legs[self.legs.len() - 1]
    }

    /// Overall origin name.
    pub fn origin(&self) -> &str {
        &self.first_leg().from
    }

    /// Overall destination name.
    pub fn destination(&self) -> &str {
        &self.last_leg().to
    }

    pub fn price_eur(&self) -> Option<f64> {
        self.price_eur
    }

    pub fn duration_min(&self) -> Option<u32> {
        self.duration_min
    }

    pub fn co2_kg(&self) -> Option<f64> {
        self.co2_kg
    }

    pub fn transfers(&self) -> Option<u32> {
        self.transfers
    }

    /// Transfer count, treating an absent value as a direct trip.
    pub fn transfer_count(&self) -> u32 {
        self.transfers.unwrap_or(0)
    }

    /// Precomputed score, if the upstream service supplied one.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn eta(&self) -> Option<&str> {
        self.eta.as_deref()
    }

    /// Returns a copy carrying the given score.
    pub(crate) fn with_score(&self, score: f64) -> Self {
        Self {
            score: Some(score.clamp(0.0, 1.0)),
            ..self.clone()
        }
    }

    /// Returns a copy carrying the given CO₂ figure.
    pub(crate) fn with_co2_kg(&self, co2_kg: f64) -> Self {
        Self {
            co2_kg: Some(co2_kg.max(0.0)),
            ..self.clone()
        }
    }
}
