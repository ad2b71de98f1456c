//! Candidate ranking for search results.
//!
//! Orders candidates for presentation, either by preference-weighted score
//! or by a single raw metric.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Candidate, Preferences};

use super::config::ScoringConfig;
use super::score::{MetricRanges, Metrics, score_metrics};

/// The order in which to present candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Descending preference-weighted score
    #[default]
    Score,
    /// Ascending price
    Price,
    /// Ascending duration
    Duration,
    /// Ascending CO₂
    Co2,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Score => "score",
            SortKey::Price => "price",
            SortKey::Duration => "duration",
            SortKey::Co2 => "co2",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(SortKey::Score),
            "price" => Ok(SortKey::Price),
            "duration" => Ok(SortKey::Duration),
            "co2" => Ok(SortKey::Co2),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank candidates by preference.
///
/// Every returned candidate carries its score and its resolved CO₂ figure.
/// Candidates are sorted best-first by score; equal scores keep their input
/// order. The input is left untouched.
pub fn sort_candidates(
    candidates: &[Candidate],
    prefs: &Preferences,
    config: &ScoringConfig,
) -> Vec<Candidate> {
    let metrics: Vec<Metrics> = candidates
        .iter()
        .map(|c| Metrics::resolve(c, config))
        .collect();

    let Some(ranges) = MetricRanges::from_metrics(&metrics) else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, f64, Candidate)> = candidates
        .iter()
        .zip(&metrics)
        .enumerate()
        .map(|(idx, (candidate, m))| {
            let score = candidate
                .score()
                .unwrap_or_else(|| score_metrics(m, &ranges, prefs));
            let enriched = candidate.with_score(score).with_co2_kg(m.co2_kg);
            (idx, score, enriched)
        })
        .collect();

    // Primary: higher score. Tie-break: original position.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    debug!(count = scored.len(), "ranked candidates by score");

    scored.into_iter().map(|(_, _, c)| c).collect()
}

/// Rank candidates by the given key.
///
/// `SortKey::Score` delegates to [`sort_candidates`]. The single-metric keys
/// sort ascending on the resolved metric (0 for a missing price or
/// duration, the estimate for missing CO₂) without scoring; equal values
/// keep their input order. Returned candidates carry their resolved CO₂.
///
/// Unknown CO₂ sorts by its estimate rather than as 0, so an unreported
/// flight never sorts as the greenest option.
pub fn sort_by(
    candidates: &[Candidate],
    key: SortKey,
    prefs: &Preferences,
    config: &ScoringConfig,
) -> Vec<Candidate> {
    let metric: fn(&Metrics) -> f64 = match key {
        SortKey::Score => return sort_candidates(candidates, prefs, config),
        SortKey::Price => |m: &Metrics| m.price_eur,
        SortKey::Duration => |m: &Metrics| m.duration_min,
        SortKey::Co2 => |m: &Metrics| m.co2_kg,
    };

    let mut keyed: Vec<(usize, f64, Candidate)> = candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let m = Metrics::resolve(candidate, config);
            (idx, metric(&m), candidate.with_co2_kg(m.co2_kg))
        })
        .collect();

    keyed.sort_by(|a, b| match a.1.total_cmp(&b.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });

    debug!(count = keyed.len(), %key, "ranked candidates by metric");

    keyed.into_iter().map(|(_, _, c)| c).collect()
}
