//! Query URL construction for OSRM-compatible backends.

use std::fmt;

use crate::coordinates::{Coordinate, CoordinateSequence};

/// How the backend should solve the coordinate sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveMode {
    /// Visit the coordinates in the given order (`/route`).
    #[default]
    OrderedRoute,
    /// Let the backend reorder the coordinates (`/trip`).
    ReorderedTrip,
}

impl SolveMode {
    pub fn from_trip_flag(trip: bool) -> Self {
        if trip {
            SolveMode::ReorderedTrip
        } else {
            SolveMode::OrderedRoute
        }
    }

    /// Service name used in the request path.
    pub fn service(self) -> &'static str {
        match self {
            SolveMode::OrderedRoute => "route",
            SolveMode::ReorderedTrip => "trip",
        }
    }

    /// Top-level response key holding the solutions.
    pub fn response_key(self) -> &'static str {
        match self {
            SolveMode::OrderedRoute => "routes",
            SolveMode::ReorderedTrip => "trips",
        }
    }
}

/// Resolution of the returned path geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    #[default]
    Full,
    Simplified,
}

impl DetailLevel {
    pub fn from_simplified_flag(simplified: bool) -> Self {
        if simplified {
            DetailLevel::Simplified
        } else {
            DetailLevel::Full
        }
    }

    pub fn overview(self) -> &'static str {
        match self {
            DetailLevel::Full => "full",
            DetailLevel::Simplified => "simplified",
        }
    }
}

/// One backend serving a single vehicle profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEndpoint {
    pub host: String,
    pub port: u16,
    pub label: String,
}

impl ProfileEndpoint {
    pub fn new(host: impl Into<String>, port: u16, label: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            label: label.into(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ProfileEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.label, self.host, self.port)
    }
}

/// Everything needed to query one profile.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpec<'a> {
    pub endpoint: &'a ProfileEndpoint,
    pub mode: SolveMode,
    pub coordinates: &'a CoordinateSequence,
    pub detail: DetailLevel,
}

impl RequestSpec<'_> {
    pub fn url(&self) -> String {
        build_url(self.endpoint, self.mode, self.coordinates, self.detail)
    }
}

/// Builds `http://{host}:{port}/{service}/v1/driving/{coords}?overview=..&geometries=geojson`.
///
/// Coordinates keep their input order.
pub fn build_url(
    endpoint: &ProfileEndpoint,
    mode: SolveMode,
    coordinates: &CoordinateSequence,
    detail: DetailLevel,
) -> String {
    let coords = coordinates
        .points()
        .iter()
        .map(|coordinate| format_pair(*coordinate))
        .collect::<Vec<_>>()
        .join(";");

    format!(
        "{}/{}/v1/driving/{}?overview={}&geometries=geojson",
        endpoint.base_url(),
        mode.service(),
        coords,
        detail.overview()
    )
}

fn format_pair(coordinate: Coordinate) -> String {
    format!("{},{}", format_degrees(coordinate.lon), format_degrees(coordinate.lat))
}

// Integral values keep a trailing `.0` (`9.0`, not `9`).
fn format_degrees(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
