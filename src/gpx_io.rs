//! GPX reading and augmented-GPX writing.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track as GpxTrack, TrackSegment, Waypoint};

use crate::error::{Result, WaypointError};
use crate::pipeline::AcceptedWaypoint;
use crate::{GpsPoint, Track};

/// Read a recorded track from a GPX file.
///
/// All segments of all tracks are flattened into one point sequence, in file
/// order, with elevation carried over. Errors when the file holds no track
/// points at all.
pub fn read_track(path: &Path) -> Result<Track> {
    let file = File::open(path)?;
    let gpx = gpx::read(BufReader::new(file))?;

    let name = gpx
        .tracks
        .first()
        .and_then(|t| t.name.clone())
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "track".to_string());

    let mut points = Vec::new();
    for track in &gpx.tracks {
        for segment in &track.segments {
            for pt in &segment.points {
                points.push(GpsPoint {
                    latitude: pt.point().y(),
                    longitude: pt.point().x(),
                    elevation: pt.elevation,
                });
            }
        }
    }

    if points.is_empty() {
        return Err(WaypointError::EmptyTrack {
            path: path.to_path_buf(),
        });
    }

    Ok(Track { name, points })
}

/// Write the original track plus the accepted waypoints to a GPX file.
///
/// The track points are written unchanged; each accepted feature becomes a
/// top-level waypoint at its snapped position with the feature name and the
/// rule's marker as `<type>`.
pub fn write_augmented_gpx(
    path: &Path,
    track: &Track,
    waypoints: &[AcceptedWaypoint],
) -> Result<()> {
    let mut segment = TrackSegment::new();
    for p in &track.points {
        segment.points.push(to_gpx_waypoint(p));
    }

    let mut out_track = GpxTrack::new();
    out_track.name = Some(track.name.clone());
    out_track.segments.push(segment);

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("autowaypoint".to_string()),
        ..Gpx::default()
    };
    gpx.tracks.push(out_track);

    for wp in waypoints {
        let mut out = to_gpx_waypoint(&wp.point);
        out.name = Some(wp.name.clone());
        out.type_ = Some(wp.marker.clone());
        gpx.waypoints.push(out);
    }

    let file = File::create(path)?;
    gpx::write(&gpx, BufWriter::new(file))?;
    Ok(())
}

fn to_gpx_waypoint(p: &GpsPoint) -> Waypoint {
    let mut wp = Waypoint::new(Point::new(p.longitude, p.latitude));
    wp.elevation = p.elevation;
    wp
}
