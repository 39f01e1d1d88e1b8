//! GeoJSON payload handed to the visualization sink.

use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::{Value, json};

use crate::compare::ComparisonOutcome;
use crate::response::ExtractedResult;
use crate::style::{ComparisonStyle, ProfileStyle};

/// Combines both profiles into one collection.
///
/// Order: primary path, alternative path, primary waypoints, alternative
/// waypoints. Waypoints appear in solved order and are labelled
/// `solved_order + 1`.
pub fn feature_collection(outcome: &ComparisonOutcome, style: &ComparisonStyle) -> FeatureCollection {
    let mut features = vec![
        path_feature(&outcome.primary, &outcome.primary_label, &style.primary),
        path_feature(&outcome.alternative, &outcome.alternative_label, &style.alternative),
    ];
    features.extend(waypoint_features(
        &outcome.primary,
        &outcome.primary_label,
        &style.primary,
    ));
    features.extend(waypoint_features(
        &outcome.alternative,
        &outcome.alternative_label,
        &style.alternative,
    ));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn path_feature(result: &ExtractedResult, label: &str, style: &ProfileStyle) -> Feature {
    let mut properties = style.path_properties();
    properties.insert("profile".to_string(), json!(label));
    properties.insert("distance".to_string(), json!(result.total_distance));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::LineString(
            result.geometry.to_positions(),
        ))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn waypoint_features<'a>(
    result: &'a ExtractedResult,
    label: &'a str,
    style: &'a ProfileStyle,
) -> impl Iterator<Item = Feature> + 'a {
    let mut waypoints: Vec<_> = result.waypoints.iter().collect();
    waypoints.sort_by_key(|waypoint| waypoint.solved_order);

    waypoints.into_iter().map(move |waypoint| {
        let mut properties = style.marker_properties(waypoint.solved_order + 1);
        properties.insert("profile".to_string(), Value::String(label.to_string()));
        properties.insert("input-index".to_string(), json!(waypoint.original_index));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::Point(
                waypoint.location.to_position(),
            ))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    })
}
