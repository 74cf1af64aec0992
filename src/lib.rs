//! # autowaypoint
//!
//! Augment a recorded GPS track with nearby points of interest.
//!
//! This library provides:
//! - Bounding box, centroid, nearest-point and haversine utilities
//! - Rule-based matching of OpenStreetMap features against a track
//! - An Overpass API query client and an on-disk query cache
//! - GPX reading and augmented-GPX writing
//!
//! The pipeline loads a GPX track, queries Overpass for features inside the
//! track's bounding box (one query per configured tag/value rule), reduces
//! each feature to a representative coordinate, keeps the ones within the
//! rule's distance threshold that pass its name filter, and writes the track
//! back out with the survivors as waypoints snapped to the nearest track
//! vertex.
//!
//! ## Quick Start
//! ```
//! use autowaypoint::{geo_utils, GpsPoint};
//!
//! let track = vec![
//!     GpsPoint::new(46.0, 7.0),
//!     GpsPoint::new(46.1, 7.2),
//!     GpsPoint::new(46.05, 7.1),
//! ];
//!
//! let bounds = geo_utils::compute_bounds(&track).unwrap();
//! let center = bounds.center();
//! assert!(center.latitude >= bounds.min_lat && center.latitude <= bounds.max_lat);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, WaypointError};

// Geographic utilities (bounds, center, nearest point, haversine)
pub mod geo_utils;

// Feature geometry variants and representative-point extraction
pub mod geometry;
pub use geometry::FeatureGeometry;

// Rule configuration and (tag, value) dispatch
pub mod config;
pub use config::{Config, RuleFilter, RuleTable, WaypointRule};

// Name-substring filter evaluation
pub mod filter;
pub use filter::passes_filter;

// Overpass API query collaborator
pub mod overpass;
pub use overpass::{OverpassClient, PoiFeature, PoiSource};

// On-disk cache of pre-filter query results
pub mod cache;
pub use cache::QueryCache;

// Run orchestration
pub mod pipeline;
pub use pipeline::{
    collect_features, filter_features, AcceptedWaypoint, MatchedFeature, RuleCounts, RunReport,
};

// GPX reading and writing
pub mod gpx_io;
pub use gpx_io::{read_track, write_augmented_gpx};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use autowaypoint::GpsPoint;
/// let point = GpsPoint::new(46.5197, 6.6323); // Lausanne
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl GpsPoint {
    /// Create a new GPS point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a new GPS point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Axis-aligned bounding box over longitude/latitude.
///
/// Only ever constructed from at least one point; the degenerate infinite box
/// used during the fold never escapes `from_points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from GPS points. Returns `None` for an empty slice.
    ///
    /// The fold takes component-wise min/max per axis, so the result is
    /// independent of input order.
    pub fn from_points(points: &[GpsPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lng = f64::INFINITY;
        let mut max_lng = f64::NEG_INFINITY;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds (arithmetic midpoint per axis).
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// A recorded track: ordered points, read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track name from the GPX metadata or the file name.
    pub name: String,
    pub points: Vec<GpsPoint>,
}
