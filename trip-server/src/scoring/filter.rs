//! Hard preference filters.
//!
//! Applied to a candidate set before ranking. These remove candidates
//! outright instead of lowering their score.

use tracing::debug;

use crate::domain::{Candidate, Preferences};

/// Drop candidates the user has ruled out.
///
/// - With `max_price` set, candidates priced above it are removed. A
///   candidate without a price is kept, since it may be within budget.
/// - With `avoid_flights` set, flight-mode candidates are removed.
pub fn apply_hard_filters(candidates: &[Candidate], prefs: &Preferences) -> Vec<Candidate> {
    let kept: Vec<Candidate> = candidates
        .iter()
        .filter(|c| !(prefs.avoid_flights && c.mode().is_flight()))
        .filter(|c| match (prefs.max_price, c.price_eur()) {
            (Some(max), Some(price)) => price <= max,
            _ => true,
        })
        .cloned()
        .collect();

    if kept.len() < candidates.len() {
        debug!(
            removed = candidates.len() - kept.len(),
            max_price = ?prefs.max_price,
            avoid_flights = prefs.avoid_flights,
            "hard filters removed candidates"
        );
    }

    kept
}
