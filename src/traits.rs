//! Seams between the comparison core and its collaborators.
//!
//! Concrete HTTP and rendering backends implement these; tests substitute
//! in-memory versions.

use geojson::FeatureCollection;

use crate::error::Error;
use crate::response::RawResponse;

/// Issues a single request against a routing backend.
///
/// Implementations must not retry or cache: every call is one round trip.
pub trait RouteFetcher {
    fn fetch(&self, url: &str) -> Result<RawResponse, Error>;
}

impl<T: RouteFetcher + ?Sized> RouteFetcher for &T {
    fn fetch(&self, url: &str) -> Result<RawResponse, Error> {
        (**self).fetch(url)
    }
}

/// Receives the combined feature collection of a run.
pub trait VisualizationSink {
    fn display(&self, collection: &FeatureCollection) -> Result<(), Error>;
}
