//! CO₂ estimation for candidates that arrive without an emissions figure.

use tracing::trace;

use crate::domain::{Candidate, Leg};

use super::config::{DistanceStrategy, ScoringConfig};

/// Estimate the distance between a trip's first and last leg, in km.
///
/// With `DistanceStrategy::Placeholder` this is a fixed constant regardless
/// of the route. It is a stand-in, not a measured distance.
pub fn estimate_distance_km(first: &Leg, last: &Leg, config: &ScoringConfig) -> f64 {
    match config.distance {
        DistanceStrategy::Placeholder => config.placeholder_distance_km,
        DistanceStrategy::GreatCircle => match (first.from_loc, last.to_loc) {
            (Some(from), Some(to)) => from.distance_km(&to),
            _ => config.placeholder_distance_km,
        },
    }
}

/// Resolve a candidate's CO₂ mass in kg.
///
/// A known `co2_kg` is returned unchanged. Otherwise the estimate is
/// `distance_km * emission_factor[mode]`.
pub fn estimate_co2(candidate: &Candidate, config: &ScoringConfig) -> f64 {
    if let Some(co2) = candidate.co2_kg() {
        return co2;
    }

    let distance = estimate_distance_km(candidate.first_leg(), candidate.last_leg(), config);
    let factor = config.emission.factor_for(candidate.mode());
    let co2 = distance * factor;

    trace!(
        origin = candidate.origin(),
        destination = candidate.destination(),
        mode = %candidate.mode(),
        distance,
        factor,
        co2,
        "estimated CO2"
    );

    co2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateRecord, GeoPoint, TransportMode};

    fn candidate(mode: TransportMode, co2_kg: Option<f64>) -> Candidate {
        Candidate::try_from(CandidateRecord {
            co2_kg,
            price_eur: Some(40.0),
            duration_min: Some(200),
            transfers: Some(1),
            ..CandidateRecord::new(mode, vec![Leg::new("Amsterdam", "Paris")])
        })
        .unwrap()
    }

    fn located(mode: TransportMode) -> Candidate {
        let legs = vec![
            Leg::new("Amsterdam", "Brussels")
                .with_locations(GeoPoint::new(52.3791, 4.9003), GeoPoint::new(50.8357, 4.3365)),
            Leg::new("Brussels", "Paris")
                .with_locations(GeoPoint::new(50.8357, 4.3365), GeoPoint::new(48.8809, 2.3553)),
        ];
        Candidate::new(mode, legs).unwrap()
    }

    #[test]
    fn known_value_is_never_overwritten() {
        let c = candidate(TransportMode::Flight, Some(85.3));
        assert_eq!(estimate_co2(&c, &ScoringConfig::default()), 85.3);
    }

    #[test]
    fn known_zero_is_kept() {
        let c = candidate(TransportMode::Flight, Some(0.0));
        assert_eq!(estimate_co2(&c, &ScoringConfig::default()), 0.0);
    }

    #[test]
    fn train_uses_placeholder_distance() {
        let c = candidate(TransportMode::Train, None);
        let co2 = estimate_co2(&c, &ScoringConfig::default());
        assert!((co2 - 7.0).abs() < 1e-9, "got {co2}");
    }

    #[test]
    fn each_mode_uses_its_factor() {
        let config = ScoringConfig::default();
        let expected = [
            (TransportMode::Train, 7.0),
            (TransportMode::Flight, 127.5),
            (TransportMode::Bus, 34.0),
            (TransportMode::Car, 96.0),
            (TransportMode::Ferry, 57.5),
        ];
        for (mode, kg) in expected {
            let co2 = estimate_co2(&candidate(mode, None), &config);
            assert!((co2 - kg).abs() < 1e-9, "{mode}: expected {kg}, got {co2}");
        }
    }

    #[test]
    fn placeholder_ignores_coordinates() {
        let c = located(TransportMode::Train);
        assert_eq!(
            estimate_distance_km(c.first_leg(), c.last_leg(), &ScoringConfig::default()),
            500.0
        );
    }

    #[test]
    fn great_circle_uses_route_endpoints() {
        let config = ScoringConfig::default().with_distance(DistanceStrategy::GreatCircle);
        let c = located(TransportMode::Train);

        let d = estimate_distance_km(c.first_leg(), c.last_leg(), &config);
        assert!((420.0..440.0).contains(&d), "got {d}");

        let co2 = estimate_co2(&c, &config);
        assert!((co2 - d * 0.014).abs() < 1e-9);
    }

    #[test]
    fn great_circle_falls_back_without_coordinates() {
        let config = ScoringConfig::default().with_distance(DistanceStrategy::GreatCircle);
        let c = candidate(TransportMode::Bus, None);
        assert_eq!(
            estimate_distance_km(c.first_leg(), c.last_leg(), &config),
            500.0
        );
    }
}
