//! Leg types.
//!
//! A `Leg` is one directed travel segment of a candidate trip, e.g. a single
//! train from Amsterdam Centraal to Paris Gare du Nord.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a new point.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check the point lies on the globe.
    pub fn validate(&self) -> Result<(), DomainError> {
        if (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon) {
            Ok(())
        } else {
            Err(DomainError::InvalidCoordinates {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    /// Great-circle (haversine) distance to another point, in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        // Rounding can push antipodal points just past 1.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// One directed travel segment.
///
/// Times are kept as the opaque local strings the search service returns
/// (e.g. `"08:25"`); there is no timezone guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Origin name
    pub from: String,

    /// Destination name
    pub to: String,

    /// Local departure time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_time: Option<String>,

    /// Local arrival time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arr_time: Option<String>,

    /// Carrier name (e.g. "Thalys")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// Service number (e.g. "9342")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_no: Option<String>,

    /// Origin coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_loc: Option<GeoPoint>,

    /// Destination coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_loc: Option<GeoPoint>,
}

impl Leg {
    /// Creates a leg with only origin and destination names.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            dep_time: None,
            arr_time: None,
            carrier: None,
            service_no: None,
            from_loc: None,
            to_loc: None,
        }
    }

    /// Sets departure and arrival times.
    pub fn with_times(mut self, dep: impl Into<String>, arr: impl Into<String>) -> Self {
        self.dep_time = Some(dep.into());
        self.arr_time = Some(arr.into());
        self
    }

    /// Sets the carrier and service number.
    pub fn with_service(
        mut self,
        carrier: impl Into<String>,
        service_no: impl Into<String>,
    ) -> Self {
        self.carrier = Some(carrier.into());
        self.service_no = Some(service_no.into());
        self
    }

    /// Check any coordinates on the leg.
    pub fn validate(&self) -> Result<(), DomainError> {
        for point in [&self.from_loc, &self.to_loc].into_iter().flatten() {
            point.validate()?;
        }
        Ok(())
    }

    /// Sets origin and destination coordinates.
    pub fn with_locations(mut self, from: GeoPoint, to: GeoPoint) -> Self {
        self.from_loc = Some(from);
        self.to_loc = Some(to);
        self
    }
}
