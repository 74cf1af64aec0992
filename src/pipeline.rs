//! Run orchestration: collect features per rule, gate by distance, apply the
//! name filter, snap survivors to the track.
//!
//! State is threaded through as values; the only accumulators are the
//! returned feature list and the report.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::filter::passes_filter;
use crate::geo_utils::{find_closest, haversine_km};
use crate::geometry::FeatureGeometry;
use crate::overpass::PoiSource;
use crate::{Bounds, GpsPoint};

/// A query result matched to a configured rule, before distance gating.
///
/// This is also the cache payload: a cached run restores exactly this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedFeature {
    /// Tag key of the rule this feature matched.
    pub tag: String,
    /// Tag value of the rule this feature matched.
    pub value: String,
    /// The feature's display name (`name` tag).
    pub name: String,
    pub geometry: FeatureGeometry,
}

/// A feature that survived distance gating and filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedWaypoint {
    /// The nearest track vertex (the snapped output position), not the raw
    /// feature position.
    pub point: GpsPoint,
    pub name: String,
    /// Waypoint `<type>` marker from the rule.
    pub marker: String,
    /// Great-circle distance from the snapped vertex to the feature's
    /// representative point.
    pub distance_km: f64,
}

/// Per-rule counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleCounts {
    /// Features matched to this rule before gating.
    pub matched: usize,
    /// Features accepted as output waypoints.
    pub accepted: usize,
}

/// Outcome of the filter stage.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub accepted: Vec<AcceptedWaypoint>,
    /// Counters indexed like `Config::points`.
    pub counts: Vec<RuleCounts>,
}

/// Issue one bounding-box query per rule, sequentially, and match each named
/// result against the rule table.
///
/// A query failure aborts the whole run; partial per-rule results are never
/// returned. Unnamed features and features whose first configured tag does
/// not resolve to a rule are dropped here. A rule whose query yields no
/// matches simply contributes nothing; that shows up in the summary counts
/// only.
pub fn collect_features(
    source: &dyn PoiSource,
    config: &Config,
    bounds: &Bounds,
) -> Result<Vec<MatchedFeature>> {
    let table = config.rule_table();
    let mut found = Vec::new();

    for rule in &config.points {
        info!("querying {}={}", rule.tag, rule.value);
        let results = source.query_bbox(&rule.tag, &rule.value, bounds)?;
        let before = found.len();

        for feature in results {
            let Some(name) = feature.display_name().map(str::to_string) else {
                continue;
            };
            let Some(matched) = table.match_tags(&feature.tags) else {
                continue;
            };
            found.push(MatchedFeature {
                tag: matched.tag.clone(),
                value: matched.value.clone(),
                name,
                geometry: feature.geometry,
            });
        }

        info!(
            "{}={}: {} matched features",
            rule.tag,
            rule.value,
            found.len() - before
        );
    }

    Ok(found)
}

/// Gate matched features by distance to the track and by the name filter.
///
/// Per feature: representative point → nearest track vertex (planar proxy) →
/// haversine distance → distance gate → name filter. Survivors are snapped to
/// the nearest vertex. Features with unusable geometry or a non-finite
/// distance are skipped with a diagnostic, never fatally.
///
/// `track` must be non-empty; an empty track errors on the first feature.
pub fn filter_features(
    features: Vec<MatchedFeature>,
    track: &[GpsPoint],
    config: &Config,
) -> Result<RunReport> {
    let mut counts = vec![RuleCounts::default(); config.points.len()];
    let mut accepted = Vec::new();

    for feature in features {
        let Some(index) = config
            .points
            .iter()
            .position(|r| r.tag == feature.tag && r.value == feature.value)
        else {
            // Possible when a cached feature references a rule that was
            // removed from the config since the cache was written.
            warn!(
                "no configured rule for {}={} (feature {:?}); skipping",
                feature.tag, feature.value, feature.name
            );
            continue;
        };
        let rule = &config.points[index];
        counts[index].matched += 1;

        let Some(point) = feature.geometry.representative_point() else {
            warn!("feature {:?} has no usable geometry; skipping", feature.name);
            continue;
        };

        let closest = find_closest(track, &point)?;
        let distance_km = haversine_km(&closest.point, &point);
        if !distance_km.is_finite() {
            warn!(
                "non-finite distance for feature {:?} at {:?}; skipping",
                feature.name, point
            );
            continue;
        }

        if distance_km > rule.min_distance {
            continue;
        }
        if !passes_filter(&feature.name, rule) {
            continue;
        }

        counts[index].accepted += 1;
        accepted.push(AcceptedWaypoint {
            point: closest.point,
            name: feature.name,
            marker: rule.marker.clone(),
            distance_km,
        });
    }

    Ok(RunReport { accepted, counts })
}
