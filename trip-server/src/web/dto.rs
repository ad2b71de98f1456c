//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::agent::Query;
use crate::domain::{Candidate, Preferences};
use crate::scoring::SortKey;

/// Request to plan a trip from free text.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// What the user typed, e.g. "Amsterdam to Paris tomorrow morning"
    pub text: String,

    /// Preference weights (defaults when absent)
    #[serde(default)]
    pub preferences: Option<Preferences>,

    /// Result order (best match when absent)
    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// Request to re-rank a candidate set the client already holds.
#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub preferences: Option<Preferences>,

    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// Planned and ranked trip options.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    /// How the agent interpreted the request
    pub query: Query,

    /// Candidates in display order
    pub candidates: Vec<Candidate>,

    /// Position in `candidates` of the agent's pick, if it survived filtering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<usize>,
}

/// Re-ranked candidates.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub candidates: Vec<Candidate>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Find where the agent's pick ended up after filtering and ranking.
///
/// Candidates are matched by id, so a pick without an id cannot be located.
pub fn locate_pick(
    original: &[Candidate],
    pick: Option<usize>,
    ranked: &[Candidate],
) -> Option<usize> {
    let id = original.get(pick?)?.id()?;
    ranked.iter().position(|c| c.id() == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::default_candidates;

    #[test]
    fn plan_request_defaults() {
        let req: PlanRequest = serde_json::from_str(r#"{"text": "Berlin to Prague"}"#).unwrap();
        assert_eq!(req.text, "Berlin to Prague");
        assert!(req.preferences.is_none());
        assert!(req.sort.is_none());
    }

    #[test]
    fn plan_request_full() {
        let req: PlanRequest = serde_json::from_str(
            r#"{
                "text": "Berlin to Prague",
                "preferences": {"w_time": 1, "w_price": 0, "w_co2": 0, "w_transfers": 0, "avoid_flights": true},
                "sort": "co2"
            }"#,
        )
        .unwrap();
        let prefs = req.preferences.unwrap();
        assert_eq!(prefs.w_time, 1.0);
        assert!(prefs.avoid_flights);
        assert_eq!(req.sort, Some(SortKey::Co2));
    }

    #[test]
    fn rank_request_rejects_invalid_candidates() {
        let json = r#"{"candidates": [{"mode": "train", "legs": [{"from": "A", "to": "B"}], "price_eur": -1}]}"#;
        assert!(serde_json::from_str::<RankRequest>(json).is_err());
    }

    #[test]
    fn pick_is_located_by_id() {
        let original = default_candidates();
        let reversed: Vec<Candidate> = original.iter().rev().cloned().collect();

        assert_eq!(locate_pick(&original, Some(0), &reversed), Some(2));
        assert_eq!(locate_pick(&original, Some(2), &reversed), Some(0));
        assert_eq!(locate_pick(&original, None, &reversed), None);
        assert_eq!(locate_pick(&original, Some(7), &reversed), None);
        assert_eq!(locate_pick(&original, Some(1), &reversed[..1]), None);
    }
}
