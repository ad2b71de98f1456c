//! Scoring configuration.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::TransportMode;

/// Placeholder trip distance used when no better estimate is available (km).
pub const PLACEHOLDER_DISTANCE_KM: f64 = 500.0;

/// Emission factor for modes missing from the table (kg CO₂ per passenger-km).
pub const FALLBACK_EMISSION_FACTOR: f64 = 0.1;

/// How trip distance is estimated when a candidate has no CO₂ figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceStrategy {
    /// Always use the fixed placeholder distance.
    ///
    /// This is a rough approximation, not a geodesic calculation.
    #[default]
    Placeholder,

    /// Haversine distance between the first leg's origin and the last leg's
    /// destination when both carry coordinates, else the placeholder.
    ///
    /// Changes CO₂ estimates (and therefore rankings) relative to
    /// `Placeholder`, so it must be opted into.
    GreatCircle,
}

impl DistanceStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceStrategy::Placeholder => "placeholder",
            DistanceStrategy::GreatCircle => "great-circle",
        }
    }
}

impl FromStr for DistanceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(DistanceStrategy::Placeholder),
            "great-circle" | "great_circle" | "haversine" => Ok(DistanceStrategy::GreatCircle),
            other => Err(format!("unknown distance strategy: {other}")),
        }
    }
}

impl fmt::Display for DistanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode CO₂ emission factors in kg per passenger-km.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactors {
    factors: HashMap<TransportMode, f64>,
    fallback: f64,
}

impl EmissionFactors {
    /// An empty table; every mode uses `fallback`.
    pub fn new(fallback: f64) -> Self {
        Self {
            factors: HashMap::new(),
            fallback,
        }
    }

    /// Set the factor for a mode.
    pub fn with(mut self, mode: TransportMode, kg_per_km: f64) -> Self {
        self.factors.insert(mode, kg_per_km);
        self
    }

    /// Factor for a mode, or the fallback if the mode is not in the table.
    pub fn factor_for(&self, mode: TransportMode) -> f64 {
        self.factors.get(&mode).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self::new(FALLBACK_EMISSION_FACTOR)
            .with(TransportMode::Train, 0.014)
            .with(TransportMode::Flight, 0.255)
            .with(TransportMode::Bus, 0.068)
            .with(TransportMode::Car, 0.192)
            .with(TransportMode::Ferry, 0.115)
    }
}

/// Configuration for candidate scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Distance assumed when it cannot be estimated (km).
    pub placeholder_distance_km: f64,

    /// How to estimate trip distance for CO₂ estimation.
    pub distance: DistanceStrategy,

    /// Per-mode emission factors.
    pub emission: EmissionFactors,
}

impl ScoringConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        placeholder_distance_km: f64,
        distance: DistanceStrategy,
        emission: EmissionFactors,
    ) -> Self {
        Self {
            placeholder_distance_km,
            distance,
            emission,
        }
    }

    /// Use a different distance strategy.
    pub fn with_distance(mut self, distance: DistanceStrategy) -> Self {
        self.distance = distance;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            placeholder_distance_km: PLACEHOLDER_DISTANCE_KM,
            distance: DistanceStrategy::Placeholder,
            emission: EmissionFactors::default(),
        }
    }
}
