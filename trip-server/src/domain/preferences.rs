//! User preference weights.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Relative importance the user places on each trip metric.
///
/// Weights are non-negative and need not sum to 1; the scorer divides by
/// their sum. `max_price` and `avoid_flights` are hard filters applied
/// before ranking, not inputs to the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub w_time: f64,
    pub w_price: f64,
    pub w_co2: f64,
    pub w_transfers: f64,

    /// Maximum acceptable price in EUR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    /// Exclude flight-mode candidates
    #[serde(default)]
    pub avoid_flights: bool,
}

impl Preferences {
    /// Create preferences with the given weights and no hard filters.
    pub fn new(w_time: f64, w_price: f64, w_co2: f64, w_transfers: f64) -> Self {
        Self {
            w_time,
            w_price,
            w_co2,
            w_transfers,
            max_price: None,
            avoid_flights: false,
        }
    }

    /// Equal weight on every metric.
    pub fn balanced() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    /// Set a maximum acceptable price.
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Exclude flights.
    pub fn avoiding_flights(mut self) -> Self {
        self.avoid_flights = true;
        self
    }

    /// Sum of the four weights.
    pub fn total_weight(&self) -> f64 {
        self.w_time + self.w_price + self.w_co2 + self.w_transfers
    }

    /// Check every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [
            ("w_time", self.w_time),
            ("w_price", self.w_price),
            ("w_co2", self.w_co2),
            ("w_transfers", self.w_transfers),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidWeight { field, value });
            }
        }
        if let Some(max) = self.max_price {
            if !max.is_finite() || max < 0.0 {
                return Err(DomainError::InvalidMetric {
                    field: "max_price",
                    value: max,
                });
            }
        }
        Ok(())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(0.3, 0.3, 0.3, 0.1)
    }
}
