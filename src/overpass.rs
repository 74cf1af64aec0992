//! Overpass API query collaborator.
//!
//! One bounding-box query per rule, issued sequentially over a blocking HTTP
//! client. The JSON response is deserialized into typed elements; each
//! element becomes a [`PoiFeature`] carrying its tags and a classified
//! [`FeatureGeometry`]. Pagination, retries and timeouts beyond the request
//! timeout are not this tool's concern.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::geometry::FeatureGeometry;
use crate::{Bounds, GpsPoint};

/// Default Overpass interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Contract the pipeline depends on: tag/value queries bounded by a box.
///
/// Implemented by [`OverpassClient`]; tests drive the pipeline through mock
/// implementations.
pub trait PoiSource {
    /// Return every feature carrying `tag=value` inside `bounds`.
    fn query_bbox(&self, tag: &str, value: &str, bounds: &Bounds) -> Result<Vec<PoiFeature>>;
}

/// One raw query result: OSM tags plus a classified geometry.
#[derive(Debug, Clone)]
pub struct PoiFeature {
    pub tags: BTreeMap<String, String>,
    pub geometry: FeatureGeometry,
}

impl PoiFeature {
    /// The feature's `name` tag, if present. Unnamed features are skipped
    /// before rule matching.
    pub fn display_name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    Way {
        #[serde(default)]
        geometry: Vec<LatLon>,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    Relation {
        #[serde(default)]
        members: Vec<OverpassMember>,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
}

#[derive(Debug, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassMember {
    /// Empty for node members; only way members carry a coordinate ring.
    #[serde(default)]
    geometry: Vec<LatLon>,
}

impl OverpassElement {
    fn into_feature(self) -> PoiFeature {
        match self {
            OverpassElement::Node { lat, lon, tags } => PoiFeature {
                tags,
                geometry: FeatureGeometry::Point(GpsPoint::new(lat, lon)),
            },
            OverpassElement::Way { geometry, tags } => PoiFeature {
                tags,
                geometry: FeatureGeometry::Line(to_points(&geometry)),
            },
            OverpassElement::Relation { members, tags } => PoiFeature {
                tags,
                geometry: FeatureGeometry::Collection(
                    members.iter().map(|m| to_points(&m.geometry)).collect(),
                ),
            },
        }
    }
}

fn to_points(coords: &[LatLon]) -> Vec<GpsPoint> {
    coords.iter().map(|c| GpsPoint::new(c.lat, c.lon)).collect()
}

/// Build the Overpass QL for one rule: `nwr[tag=value]` bounded by the box.
///
/// Bbox clause order is (south, west, north, east).
pub fn build_query(tag: &str, value: &str, bounds: &Bounds) -> String {
    format!(
        "[out:json][timeout:120];nwr[\"{}\"=\"{}\"]({},{},{},{});out tags geom;",
        tag, value, bounds.min_lat, bounds.min_lng, bounds.max_lat, bounds.max_lng
    )
}

/// Parse an Overpass JSON response body into features.
pub fn parse_response(body: &str) -> Result<Vec<PoiFeature>> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .into_iter()
        .map(OverpassElement::into_feature)
        .collect())
}

/// Blocking HTTP client for the Overpass interpreter.
pub struct OverpassClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    /// Create a client against the given interpreter endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl PoiSource for OverpassClient {
    fn query_bbox(&self, tag: &str, value: &str, bounds: &Bounds) -> Result<Vec<PoiFeature>> {
        let query = build_query(tag, value, bounds);
        debug!("overpass query: {query}");

        let body = self
            .client
            .post(&self.endpoint)
            .body(query)
            .send()?
            .error_for_status()?
            .text()?;

        parse_response(&body)
    }
}
