//! Askama templates for the web frontend.

use askama::Template;

use crate::agent::{ItineraryResponse, Query};
use crate::domain::{Candidate, Leg, Preferences};
use crate::format::{
    MISSING, format_co2, format_duration, format_opt, format_price, format_time, mode_icon,
    mode_label,
};
use crate::scoring::SortKey;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip request form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub prefs: Preferences,
    pub sort_keys: Vec<SortOption>,
}

impl IndexTemplate {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            sort_keys: SortOption::all(SortKey::default()),
        }
    }
}

/// Booking confirmation page.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub booking_id: String,
    pub status: String,
    pub user: String,
    pub booked_at: String,
    pub option: CandidateView,
}

impl ItineraryTemplate {
    pub fn from_itinerary(itinerary: &ItineraryResponse) -> Self {
        Self {
            booking_id: itinerary.booking_id.clone(),
            status: itinerary.status.clone(),
            user: itinerary.user.clone(),
            booked_at: itinerary
                .booked_at
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            option: CandidateView::from_candidate(&itinerary.option, false),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Ranked results fragment.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub from: String,
    pub to: String,
    pub sort: String,
    pub candidates: Vec<CandidateView>,
}

impl ResultsTemplate {
    pub fn new(
        query: &Query,
        sort: SortKey,
        candidates: &[Candidate],
        pick: Option<usize>,
    ) -> Self {
        Self {
            from: query.from.clone(),
            to: query.to.clone(),
            sort: sort.as_str().to_string(),
            candidates: candidates
                .iter()
                .enumerate()
                .map(|(i, c)| CandidateView::from_candidate(c, pick == Some(i)))
                .collect(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A choice in the sort selector.
#[derive(Debug, Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl SortOption {
    pub fn all(selected: SortKey) -> Vec<Self> {
        [
            (SortKey::Score, "Best match"),
            (SortKey::Price, "Cheapest"),
            (SortKey::Duration, "Fastest"),
            (SortKey::Co2, "Greenest"),
        ]
        .into_iter()
        .map(|(key, label)| SortOption {
            value: key.as_str(),
            label,
            selected: key == selected,
        })
        .collect()
    }
}

/// Candidate view model for templates.
#[derive(Debug, Clone)]
pub struct CandidateView {
    pub id: String,
    pub mode: String,
    pub mode_icon: String,
    pub mode_label: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub price: String,
    pub co2: String,
    pub transfers: u32,
    /// Score as a whole percentage
    pub score_pct: Option<u32>,
    pub is_recommended: bool,
    pub legs: Vec<LegView>,
    /// The candidate as JSON, posted back when booking
    pub json: String,
}

impl CandidateView {
    /// Create from a domain Candidate.
    pub fn from_candidate(candidate: &Candidate, is_recommended: bool) -> Self {
        let mode = candidate.mode();
        Self {
            id: candidate.id().unwrap_or_default().to_string(),
            mode: mode.as_str().to_string(),
            mode_icon: mode_icon(mode).to_string(),
            mode_label: mode_label(mode).to_string(),
            origin: candidate.origin().to_string(),
            destination: candidate.destination().to_string(),
            departure: format_time(candidate.first_leg().dep_time.as_deref()).to_string(),
            arrival: format_time(candidate.last_leg().arr_time.as_deref()).to_string(),
            duration: format_opt(candidate.duration_min(), format_duration),
            price: format_opt(candidate.price_eur(), format_price),
            co2: format_opt(candidate.co2_kg(), format_co2),
            transfers: candidate.transfer_count(),
            score_pct: candidate.score().map(|s| (s * 100.0).round() as u32),
            is_recommended,
            legs: candidate.legs().iter().map(LegView::from_leg).collect(),
            json: serde_json::to_string(candidate).unwrap_or_default(),
        }
    }

    /// Whether the trip is a single direct leg with no transfers.
    pub fn is_direct(&self) -> bool {
        self.transfers == 0 && self.legs.len() == 1
    }
}

/// Leg view model.
#[derive(Debug, Clone)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    /// Carrier and service number, e.g. "Thalys 9342"
    pub service: String,
}

impl LegView {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        let service = match (&leg.carrier, &leg.service_no) {
            (Some(carrier), Some(no)) => format!("{carrier} {no}"),
            (Some(carrier), None) => carrier.clone(),
            (None, Some(no)) => no.clone(),
            (None, None) => String::new(),
        };

        Self {
            from: leg.from.clone(),
            to: leg.to.clone(),
            departure: format_time(leg.dep_time.as_deref()).to_string(),
            arrival: format_time(leg.arr_time.as_deref()).to_string(),
            service,
        }
    }
}
