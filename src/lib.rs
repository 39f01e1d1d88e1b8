//! profile-compare core
//!
//! Queries two OSRM-compatible backends serving different vehicle profiles
//! with the same coordinates and merges their solutions into one comparable
//! GeoJSON collection and summary.

pub mod compare;
pub mod coordinates;
pub mod error;
pub mod geojson_out;
pub mod osrm;
pub mod polyline;
pub mod request;
pub mod response;
pub mod sink;
pub mod style;
pub mod traits;

pub use compare::{Comparison, ComparisonOutcome, FetchStrategy, Summary};
pub use coordinates::{Coordinate, CoordinateSequence};
pub use error::Error;
pub use request::{DetailLevel, ProfileEndpoint, SolveMode};
pub use response::{ExtractedResult, Waypoint};
