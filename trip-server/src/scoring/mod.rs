//! Multi-criteria candidate scoring and ranking.
//!
//! Given a set of trip candidates with heterogeneous, partly missing metrics
//! and the user's preference weights, this module produces a comparable
//! score per candidate and a total order over the set.
//!
//! Data flows one way: candidates are resolved (missing CO₂ estimated),
//! each metric is min-max normalized across the set into a badness, the
//! badness values are combined with the preference weights into a score,
//! and the set is sorted. Every stage is a pure function; inputs are never
//! mutated.

mod config;
mod estimate;
mod filter;
mod normalize;
mod rank;
mod score;


pub use config::{
    DistanceStrategy, EmissionFactors, FALLBACK_EMISSION_FACTOR, PLACEHOLDER_DISTANCE_KM,
    ScoringConfig,
};
pub use estimate::{estimate_co2, estimate_distance_km};
pub use filter::apply_hard_filters;
pub use normalize::{MetricRange, normalize};
pub use rank::{SortKey, sort_by, sort_candidates};
pub use score::{Badness, MetricRanges, Metrics, calculate_score, score_metrics};
