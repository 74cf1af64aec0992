//! Feature geometry variants and representative-point extraction.
//!
//! The shape of a query result is decided once, at the query-result boundary,
//! and carried as a tagged variant from then on. Anything Overpass returns
//! that cannot be classified into one of these shapes never enters the
//! pipeline.

use serde::{Deserialize, Serialize};

use crate::{Bounds, GpsPoint};

/// Geometry of a matched feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureGeometry {
    /// A single node.
    Point(GpsPoint),
    /// An ordered polyline or closed ring (a way's geometry).
    Line(Vec<GpsPoint>),
    /// One or more sub-geometries, each a coordinate ring (a relation's
    /// members).
    Collection(Vec<Vec<GpsPoint>>),
}

impl FeatureGeometry {
    /// Reduce the geometry to a single representative coordinate.
    ///
    /// - `Point` is returned as-is.
    /// - `Line` becomes the center of its bounding box.
    /// - `Collection` becomes the center of the first ring's bounding box.
    ///
    /// Returns `None` when the geometry has no usable coordinates (empty
    /// line, empty collection, or an empty first ring); callers treat that
    /// as a non-fatal skip.
    pub fn representative_point(&self) -> Option<GpsPoint> {
        match self {
            FeatureGeometry::Point(point) => Some(*point),
            FeatureGeometry::Line(points) => Bounds::from_points(points).map(|b| b.center()),
            FeatureGeometry::Collection(rings) => rings
                .first()
                .and_then(|ring| Bounds::from_points(ring))
                .map(|b| b.center()),
        }
    }
}
