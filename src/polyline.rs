//! Path geometry of a solved route or trip.
//!
//! Points are kept exactly as the backend returned them; no simplification
//! or reprojection happens here.

use crate::coordinates::Coordinate;

/// A polyline of (longitude, latitude) points in backend order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Positions in GeoJSON `LineString` layout.
    pub fn to_positions(&self) -> Vec<Vec<f64>> {
        self.points.iter().map(|point| point.to_position()).collect()
    }
}

impl From<Vec<[f64; 2]>> for Polyline {
    fn from(raw: Vec<[f64; 2]>) -> Self {
        Self::new(raw.into_iter().map(Coordinate::from).collect())
    }
}
