//! Tests for filter module

use autowaypoint::{passes_filter, RuleFilter, WaypointRule};

fn rule_with_filter(filter: Option<RuleFilter>) -> WaypointRule {
    WaypointRule {
        tag: "natural".to_string(),
        value: "water".to_string(),
        min_distance: 1.0,
        marker: "Water".to_string(),
        filter,
    }
}

#[test]
fn test_no_filter_always_passes() {
    let rule = rule_with_filter(None);
    assert!(passes_filter("Crystal Lake", &rule));
    assert!(passes_filter("", &rule));
    assert!(passes_filter("anything at all", &rule));
}

#[test]
fn test_filter_without_name_list_passes() {
    let rule = rule_with_filter(Some(RuleFilter { name: None }));
    assert!(passes_filter("Mountain Peak", &rule));
}

#[test]
fn test_name_filter_matches_substring() {
    let rule = rule_with_filter(Some(RuleFilter {
        name: Some(vec!["lake".to_string()]),
    }));
    assert!(passes_filter("Crystal Lake", &rule));
    assert!(!passes_filter("Mountain Peak", &rule));
}

#[test]
fn test_name_filter_is_case_insensitive() {
    let rule = rule_with_filter(Some(RuleFilter {
        name: Some(vec!["lake".to_string()]),
    }));
    assert!(passes_filter("CRYSTAL LAKE", &rule));
    assert!(passes_filter("lakeside hut", &rule));

    let upper_rule = rule_with_filter(Some(RuleFilter {
        name: Some(vec!["LAKE".to_string()]),
    }));
    assert!(passes_filter("Crystal lake", &upper_rule));
}

#[test]
fn test_name_filter_any_of_list() {
    let rule = rule_with_filter(Some(RuleFilter {
        name: Some(vec!["quelle".to_string(), "brunnen".to_string()]),
    }));
    assert!(passes_filter("Dorfbrunnen", &rule));
    assert!(passes_filter("Heilquelle", &rule));
    assert!(!passes_filter("Wasserfall", &rule));
}

#[test]
fn test_empty_name_list_matches_nothing() {
    let rule = rule_with_filter(Some(RuleFilter {
        name: Some(vec![]),
    }));
    assert!(!passes_filter("Crystal Lake", &rule));
}
