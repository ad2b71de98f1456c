//! Preference-weighted candidate scoring.
//!
//! Each metric is normalized against the current candidate set to a
//! "badness" in [0, 1], then combined with the user's weights. Scores are
//! relative: the same candidate scores differently in a different set.

use tracing::trace;

use crate::domain::{Candidate, Preferences};

use super::config::ScoringConfig;
use super::estimate::estimate_co2;
use super::normalize::MetricRange;

/// The four raw metrics of a candidate, with missing values resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub duration_min: f64,
    pub price_eur: f64,
    pub transfers: f64,
    pub co2_kg: f64,
}

impl Metrics {
    /// Resolve a candidate's metrics.
    ///
    /// Missing duration, price and transfers count as 0; missing CO₂ is
    /// estimated.
    pub fn resolve(candidate: &Candidate, config: &ScoringConfig) -> Self {
        Self {
            duration_min: f64::from(candidate.duration_min().unwrap_or(0)),
            price_eur: candidate.price_eur().unwrap_or(0.0),
            transfers: f64::from(candidate.transfer_count()),
            co2_kg: estimate_co2(candidate, config),
        }
    }
}

/// Per-metric ranges across a candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRanges {
    pub duration_min: MetricRange,
    pub price_eur: MetricRange,
    pub transfers: MetricRange,
    pub co2_kg: MetricRange,
}

impl MetricRanges {
    /// Ranges over already-resolved metrics, or `None` for an empty set.
    pub fn from_metrics(metrics: &[Metrics]) -> Option<Self> {
        Some(Self {
            duration_min: MetricRange::over(metrics.iter().map(|m| m.duration_min))?,
            price_eur: MetricRange::over(metrics.iter().map(|m| m.price_eur))?,
            transfers: MetricRange::over(metrics.iter().map(|m| m.transfers))?,
            co2_kg: MetricRange::over(metrics.iter().map(|m| m.co2_kg))?,
        })
    }

    /// Ranges over a candidate set, or `None` if it is empty.
    pub fn over(candidates: &[Candidate], config: &ScoringConfig) -> Option<Self> {
        let metrics: Vec<Metrics> = candidates
            .iter()
            .map(|c| Metrics::resolve(c, config))
            .collect();
        Self::from_metrics(&metrics)
    }

    /// Normalize a candidate's metrics against these ranges.
    pub fn badness(&self, metrics: &Metrics) -> Badness {
        Badness {
            duration: self.duration_min.badness(metrics.duration_min),
            price: self.price_eur.badness(metrics.price_eur),
            transfers: self.transfers.badness(metrics.transfers),
            co2: self.co2_kg.badness(metrics.co2_kg),
        }
    }
}

/// Normalized badness per metric: 0 = best in set, 1 = worst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Badness {
    pub duration: f64,
    pub price: f64,
    pub transfers: f64,
    pub co2: f64,
}

impl Badness {
    /// Preference-weighted average badness.
    ///
    /// If every weight is zero there is no preference to express, so the
    /// four metrics count equally. Weights are scaled by the largest one
    /// first, so their sum stays finite for any finite weights.
    pub fn weighted(&self, prefs: &Preferences) -> f64 {
        let weights = [prefs.w_time, prefs.w_price, prefs.w_transfers, prefs.w_co2];
        let largest = weights.iter().copied().fold(0.0, f64::max);
        if largest == 0.0 {
            return (self.duration + self.price + self.transfers + self.co2) / 4.0;
        }

        let [time, price, transfers, co2] = weights.map(|w| w / largest);
        (time * self.duration + price * self.price + transfers * self.transfers + co2 * self.co2)
            / (time + price + transfers + co2)
    }
}

/// Turn a weighted badness into a score in [0, 1].
fn score_from_badness(weighted: f64) -> f64 {
    let score = 1.0 - weighted;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Score resolved metrics against precomputed ranges.
///
/// Ignores any precomputed score; callers check that first.
pub fn score_metrics(metrics: &Metrics, ranges: &MetricRanges, prefs: &Preferences) -> f64 {
    let badness = ranges.badness(metrics);
    let weighted = badness.weighted(prefs);
    let score = score_from_badness(weighted);

    trace!(?badness, weighted, score, "scored candidate");

    score
}

/// Score a candidate relative to a candidate set.
///
/// A precomputed score on the candidate is returned verbatim, regardless of
/// the rest of the set. Otherwise each metric is normalized across
/// `all_candidates` and combined with the preference weights; the result is
/// 1 minus the weighted badness, clamped to [0, 1].
pub fn calculate_score(
    candidate: &Candidate,
    all_candidates: &[Candidate],
    prefs: &Preferences,
    config: &ScoringConfig,
) -> f64 {
    if let Some(score) = candidate.score() {
        return score;
    }

    // With no set to compare against, the candidate is its own baseline.
    let baseline = if all_candidates.is_empty() {
        std::slice::from_ref(candidate)
    } else {
        all_candidates
    };

    match MetricRanges::over(baseline, config) {
        Some(ranges) => score_metrics(&Metrics::resolve(candidate, config), &ranges, prefs),
        None => 1.0,
    }
}
