//! Tests for overpass module (query generation and response parsing; no
//! network involved)

use autowaypoint::overpass::{build_query, parse_response};
use autowaypoint::{Bounds, FeatureGeometry, GpsPoint};

#[test]
fn test_build_query_shape() {
    let bounds = Bounds {
        min_lat: 46.0,
        max_lat: 46.5,
        min_lng: 6.0,
        max_lng: 7.0,
    };
    let query = build_query("natural", "spring", &bounds);
    assert!(query.starts_with("[out:json]"));
    assert!(query.contains("nwr[\"natural\"=\"spring\"]"));
    // Bbox clause order is (south, west, north, east).
    assert!(query.contains("(46,6,46.5,7)"));
    assert!(query.ends_with("out tags geom;"));
}

#[test]
fn test_parse_node_element() {
    let body = r#"{
        "elements": [
            {
                "type": "node",
                "id": 1,
                "lat": 46.1,
                "lon": 6.2,
                "tags": { "name": "Quelle", "natural": "spring" }
            }
        ]
    }"#;
    let features = parse_response(body).unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].display_name(), Some("Quelle"));
    assert_eq!(
        features[0].geometry,
        FeatureGeometry::Point(GpsPoint::new(46.1, 6.2))
    );
}

#[test]
fn test_parse_way_element() {
    let body = r#"{
        "elements": [
            {
                "type": "way",
                "id": 2,
                "geometry": [
                    { "lat": 46.0, "lon": 6.0 },
                    { "lat": 46.2, "lon": 6.4 }
                ],
                "tags": { "name": "See", "natural": "water" }
            }
        ]
    }"#;
    let features = parse_response(body).unwrap();
    assert_eq!(
        features[0].geometry,
        FeatureGeometry::Line(vec![GpsPoint::new(46.0, 6.0), GpsPoint::new(46.2, 6.4)])
    );
}

#[test]
fn test_parse_relation_element() {
    let body = r#"{
        "elements": [
            {
                "type": "relation",
                "id": 3,
                "members": [
                    {
                        "type": "way",
                        "ref": 10,
                        "role": "outer",
                        "geometry": [
                            { "lat": 46.0, "lon": 6.0 },
                            { "lat": 46.1, "lon": 6.1 }
                        ]
                    },
                    { "type": "node", "ref": 11, "role": "label" }
                ],
                "tags": { "name": "Naturschutzgebiet", "leisure": "nature_reserve" }
            }
        ]
    }"#;
    let features = parse_response(body).unwrap();
    let FeatureGeometry::Collection(rings) = &features[0].geometry else {
        panic!("expected a collection");
    };
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].len(), 2);
    // The node member carries no ring.
    assert!(rings[1].is_empty());
}

#[test]
fn test_parse_element_without_tags() {
    let body = r#"{
        "elements": [
            { "type": "node", "id": 4, "lat": 46.0, "lon": 6.0 }
        ]
    }"#;
    let features = parse_response(body).unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].display_name(), None);
}

#[test]
fn test_parse_empty_response() {
    assert!(parse_response(r#"{ "elements": [] }"#).unwrap().is_empty());
    assert!(parse_response(r#"{}"#).unwrap().is_empty());
}

#[test]
fn test_parse_malformed_body_errors() {
    assert!(parse_response("not json").is_err());
}
