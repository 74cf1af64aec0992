//! Tests for gpx_io module

use std::fs;

use autowaypoint::{read_track, write_augmented_gpx, AcceptedWaypoint, GpsPoint, Track};

const SAMPLE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning Tour</name>
    <trkseg>
      <trkpt lat="46.0" lon="6.0"><ele>420.0</ele></trkpt>
      <trkpt lat="46.1" lon="6.1"><ele>441.5</ele></trkpt>
      <trkpt lat="46.2" lon="6.2"></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

#[test]
fn test_read_track() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tour.gpx");
    fs::write(&path, SAMPLE_GPX).unwrap();

    let track = read_track(&path).unwrap();
    assert_eq!(track.name, "Morning Tour");
    assert_eq!(track.points.len(), 3);
    assert_eq!(track.points[0], GpsPoint::with_elevation(46.0, 6.0, 420.0));
    assert_eq!(track.points[2], GpsPoint::new(46.2, 6.2));
}

#[test]
fn test_read_track_without_points_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.gpx");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
</gpx>
"#,
    )
    .unwrap();

    assert!(read_track(&path).is_err());
}

#[test]
fn test_write_and_read_back_augmented_track() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.gpx");

    let track = Track {
        name: "Morning Tour".to_string(),
        points: vec![
            GpsPoint::with_elevation(46.0, 6.0, 420.0),
            GpsPoint::new(46.1, 6.1),
        ],
    };
    let waypoints = vec![AcceptedWaypoint {
        point: GpsPoint::with_elevation(46.0, 6.0, 420.0),
        name: "Quelle".to_string(),
        marker: "Water Source".to_string(),
        distance_km: 0.1,
    }];

    write_augmented_gpx(&path, &track, &waypoints).unwrap();

    // The written file parses back with the same track points.
    let restored = read_track(&path).unwrap();
    assert_eq!(restored.name, "Morning Tour");
    assert_eq!(restored.points, track.points);

    // And the accepted feature appears as a named, typed waypoint.
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Quelle"));
    assert!(content.contains("Water Source"));
}
