//! Input coordinates and their validation.

use crate::error::Error;

/// Stuttgart sample tour used when no coordinates are supplied.
///
/// Alternates longitude and latitude.
#[rustfmt::skip]
pub const DEFAULT_ROUTE: [f64; 34] = [
    9.196618, 48.767587,
    9.173770, 48.762977,
    9.162890, 48.768612,
    9.160714, 48.778650,
    9.166465, 48.782849,
    9.169263, 48.790632,
    9.194753, 48.798413,
    9.218279, 48.805652,
    9.204883, 48.783791,
    9.167740, 48.778174,
    9.185525, 48.777780,
    9.191544, 48.782462,
    9.173416, 48.774817,
    9.159495, 48.790154,
    9.170066, 48.785639,
    9.150796, 48.783735,
    9.151582, 48.790848,
];

/// A (longitude, latitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// GeoJSON position order: `[lon, lat]`.
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

/// Validated, ordered list of at least two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSequence {
    points: Vec<Coordinate>,
}

impl CoordinateSequence {
    /// Parses a flat `lon, lat, lon, lat, ...` list.
    pub fn from_flat(values: &[f64]) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidInput {
            input: values.to_vec(),
            reason,
        };

        if values.is_empty() {
            return Err(invalid("no coordinates given"));
        }
        if values.len() % 2 != 0 {
            return Err(invalid("odd number of values, expected lon/lat pairs"));
        }
        if values.len() < 4 {
            return Err(invalid("at least two coordinates are required"));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(invalid("coordinates must be finite numbers"));
        }

        let points = values
            .chunks_exact(2)
            .map(|pair| Coordinate::new(pair[0], pair[1]))
            .collect();

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for CoordinateSequence {
    fn default() -> Self {
        let points = DEFAULT_ROUTE
            .chunks_exact(2)
            .map(|pair| Coordinate::new(pair[0], pair[1]))
            .collect();
        Self { points }
    }
}
