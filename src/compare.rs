//! Runs both profiles against the same input and pairs their results.

use std::fmt;

use geojson::FeatureCollection;

use crate::coordinates::CoordinateSequence;
use crate::error::{Error, Stage};
use crate::geojson_out;
use crate::request::{DetailLevel, ProfileEndpoint, RequestSpec, SolveMode};
use crate::response::{ExtractedResult, extract};
use crate::style::ComparisonStyle;
use crate::traits::RouteFetcher;

/// How the two profile requests are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// Primary first, then alternative.
    #[default]
    Sequential,
    /// Both profiles at once on the rayon pool.
    Parallel,
}

/// Paired results of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    pub primary_label: String,
    pub primary: ExtractedResult,
    pub alternative_label: String,
    pub alternative: ExtractedResult,
}

impl ComparisonOutcome {
    pub fn summary(&self) -> Summary {
        Summary {
            primary_label: self.primary_label.clone(),
            primary: self.primary.power_consumption(),
            alternative_label: self.alternative_label.clone(),
            alternative: self.alternative.power_consumption(),
        }
    }
}

/// Printable comparison of the distance-derived consumption figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub primary_label: String,
    /// Meters.
    pub primary: f64,
    pub alternative_label: String,
    /// Meters.
    pub alternative: f64,
}

const SUMMARY_HEADER: &str = "------------ Comparison of routing profiles ------------";
const SUMMARY_FOOTER: &str = "--------------------------------------------------------";

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            (
                format!("Power consumption {} profile:", self.primary_label),
                self.primary,
            ),
            (
                format!("Power consumption {} profile:", self.alternative_label),
                self.alternative,
            ),
            (
                format!(
                    "Difference ({} - {}):",
                    self.alternative_label, self.primary_label
                ),
                self.alternative - self.primary,
            ),
        ];

        writeln!(f, "{SUMMARY_HEADER}")?;
        for (label, meters) in rows {
            writeln!(f, "{label:<48}{:>10.2} kw", rounded_kilo(meters))?;
        }
        write!(f, "{SUMMARY_FOOTER}")
    }
}

// Two decimals of `meters / 1000`, with `-0.00` folded into `0.00`.
fn rounded_kilo(meters: f64) -> f64 {
    let value = (meters / 10.0).round() / 100.0;
    if value == 0.0 { 0.0 } else { value }
}

/// Compares two profile backends through one `RouteFetcher`.
#[derive(Debug, Clone)]
pub struct Comparison<F> {
    fetcher: F,
    style: ComparisonStyle,
    strategy: FetchStrategy,
}

impl<F> Comparison<F>
where
    F: RouteFetcher + Sync,
{
    pub fn new(fetcher: F, style: ComparisonStyle) -> Self {
        Self {
            fetcher,
            style,
            strategy: FetchStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn style(&self) -> &ComparisonStyle {
        &self.style
    }

    /// Queries both endpoints with identical coordinates, mode and detail.
    ///
    /// The first failure aborts the run; no partial outcome is returned.
    pub fn compare(
        &self,
        primary: &ProfileEndpoint,
        alternative: &ProfileEndpoint,
        coordinates: &CoordinateSequence,
        mode: SolveMode,
        detail: DetailLevel,
    ) -> Result<ComparisonOutcome, Error> {
        let run = |endpoint| {
            self.run_profile(RequestSpec {
                endpoint,
                mode,
                coordinates,
                detail,
            })
        };

        let (primary_result, alternative_result) = match self.strategy {
            FetchStrategy::Sequential => {
                let primary_result = run(primary)?;
                (primary_result, run(alternative)?)
            }
            FetchStrategy::Parallel => {
                let (primary_result, alternative_result) =
                    rayon::join(|| run(primary), || run(alternative));
                (primary_result?, alternative_result?)
            }
        };

        Ok(ComparisonOutcome {
            primary_label: primary.label.clone(),
            primary: primary_result,
            alternative_label: alternative.label.clone(),
            alternative: alternative_result,
        })
    }

    pub fn feature_collection(&self, outcome: &ComparisonOutcome) -> FeatureCollection {
        geojson_out::feature_collection(outcome, &self.style)
    }

    fn run_profile(&self, spec: RequestSpec<'_>) -> Result<ExtractedResult, Error> {
        let profile = spec.endpoint.label.as_str();
        let url = spec.url();
        tracing::info!(profile, %url, "requesting {} solution", spec.mode.service());

        let raw = self
            .fetcher
            .fetch(&url)
            .map_err(|err| err.in_profile(profile, Stage::Fetching))?;
        let result = extract(raw, spec.mode).map_err(|err| err.in_profile(profile, Stage::Extracting))?;

        tracing::info!(
            profile,
            distance = result.total_distance,
            duration = result.duration,
            waypoints = result.waypoints.len(),
            "profile solved"
        );
        Ok(result)
    }
}
