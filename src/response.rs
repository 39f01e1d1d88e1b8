//! Backend responses and their normalization into comparable results.
//!
//! A `RawResponse` is the status-checked JSON body of one request. Its
//! solution arrays stay untyped until `extract` validates them against the
//! active `SolveMode`; any shape mismatch surfaces as
//! `Error::MalformedResponse` at that boundary.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::coordinates::Coordinate;
use crate::error::Error;
use crate::polyline::Polyline;
use crate::request::SolveMode;

const STATUS_OK: &str = "Ok";

/// Parsed body of a single backend reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl RawResponse {
    /// Interprets a JSON document as a response body.
    ///
    /// Fails with `MalformedResponse` when the document is not an object or
    /// carries no status code.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        if !value.is_object() {
            return Err(Error::MalformedResponse(
                "response body is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|err| Error::MalformedResponse(format!("missing status code: {err}")))
    }

    /// Rejects bodies whose status code is anything but `Ok`.
    pub fn ensure_ok(self) -> Result<Self, Error> {
        if self.code == STATUS_OK {
            Ok(self)
        } else {
            Err(Error::Backend {
                message: self
                    .message
                    .unwrap_or_else(|| "no message provided".to_string()),
                code: self.code,
            })
        }
    }

    fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, Error> {
        let value = self
            .fields
            .remove(key)
            .ok_or_else(|| Error::MalformedResponse(format!("key `{key}` is absent")))?;
        serde_json::from_value(value)
            .map_err(|err| Error::MalformedResponse(format!("unexpected shape of `{key}`: {err}")))
    }
}

/// An input coordinate as echoed back by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub location: Coordinate,
    /// Position in the input sequence, as reported by the backend.
    pub original_index: usize,
    /// Position within the response's waypoint list.
    pub solved_order: usize,
    pub name: String,
}

/// Distance and duration between two consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Leg {
    pub distance: f64,
    pub duration: f64,
}

/// Normalized solution of one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedResult {
    pub geometry: Polyline,
    pub waypoints: Vec<Waypoint>,
    /// Meters.
    pub total_distance: f64,
    /// Seconds.
    pub duration: f64,
    pub legs: Vec<Leg>,
}

impl ExtractedResult {
    /// Energy consumption stand-in. There is no consumption model: this is
    /// the travel distance in meters.
    pub fn power_consumption(&self) -> f64 {
        self.total_distance
    }
}

#[derive(Debug, Deserialize)]
struct RawSolution {
    geometry: RawGeometry,
    distance: f64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawWaypoint {
    location: [f64; 2],
    #[serde(default)]
    waypoint_index: Option<usize>,
    #[serde(default)]
    name: String,
}

/// Pulls the first solution, its geometry and the waypoints out of `raw`.
pub fn extract(mut raw: RawResponse, mode: SolveMode) -> Result<ExtractedResult, Error> {
    let key = mode.response_key();
    let solutions: Vec<RawSolution> = raw.take(key)?;
    let solution = solutions
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse(format!("`{key}` contains no solution")))?;

    if solution.geometry.kind != "LineString" {
        return Err(Error::MalformedResponse(format!(
            "expected a LineString geometry, got `{}`",
            solution.geometry.kind
        )));
    }

    let raw_waypoints: Vec<RawWaypoint> = raw.take("waypoints")?;
    let waypoints = raw_waypoints
        .into_iter()
        .enumerate()
        .map(|(position, waypoint)| Waypoint {
            location: Coordinate::from(waypoint.location),
            // `/route` replies carry no index; their waypoints are in input order.
            original_index: waypoint.waypoint_index.unwrap_or(position),
            solved_order: position,
            name: waypoint.name,
        })
        .collect();

    Ok(ExtractedResult {
        geometry: Polyline::from(solution.geometry.coordinates),
        waypoints,
        total_distance: solution.distance,
        duration: solution.duration,
        legs: solution.legs,
    })
}
