//! Geographic utilities: bounding boxes, nearest-point search, haversine
//! distance.
//!
//! Everything here is a pure function over [`GpsPoint`] slices. Linear scans
//! are fine at the expected cardinality (hundreds of track points, hundreds
//! of features per rule).

use crate::error::{OptionExt, Result};
use crate::{Bounds, GpsPoint};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Compute the bounding box of a non-empty point sequence.
///
/// Errors on an empty slice; callers guarantee non-emptiness for tracks, and
/// the geometry extractor guards per-feature sequences.
pub fn compute_bounds(points: &[GpsPoint]) -> Result<Bounds> {
    Bounds::from_points(points).ok_or_empty("cannot compute bounds of zero points")
}

/// Great-circle distance between two points in kilometers.
///
/// Standard haversine formula. Symmetric up to floating-point error and zero
/// for identical points. Finite inputs never produce NaN; a NaN observed
/// downstream means the representative point itself was bad.
pub fn haversine_km(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let d_lat = (p2.latitude - p1.latitude).to_radians();
    let d_lng = (p2.longitude - p1.longitude).to_radians();
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // Rounding can push `a` just past 1.0 for near-antipodal points, which
    // would make sqrt(1 - a) NaN.
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Result of a nearest-point search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Closest {
    /// The winning candidate.
    pub point: GpsPoint,
    /// Its index in the candidate sequence.
    pub index: usize,
}

/// Find the candidate nearest to `target` by planar (longitude, latitude)
/// distance.
///
/// The planar metric is a deliberate cheap proxy: it only picks which track
/// vertex to snap to, never measures a real-world distance. Ties go to the
/// first minimal candidate in sequence order. Errors on an empty slice.
pub fn find_closest(candidates: &[GpsPoint], target: &GpsPoint) -> Result<Closest> {
    let first = candidates
        .first()
        .ok_or_empty("cannot search zero candidates")?;

    let mut best = Closest {
        point: *first,
        index: 0,
    };
    let mut best_dist = planar_distance_sq(first, target);

    for (index, point) in candidates.iter().enumerate().skip(1) {
        let dist = planar_distance_sq(point, target);
        if dist < best_dist {
            best_dist = dist;
            best = Closest {
                point: *point,
                index,
            };
        }
    }

    Ok(best)
}

/// Squared Euclidean distance in (lon, lat) space. Monotonic in the real
/// distance for ranking purposes, so the square root is skipped.
fn planar_distance_sq(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let dx = p2.longitude - p1.longitude;
    let dy = p2.latitude - p1.latitude;
    dx * dx + dy * dy
}
