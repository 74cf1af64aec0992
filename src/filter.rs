//! Name-based feature filtering.

use crate::config::WaypointRule;

/// Decide whether a feature's display name passes the rule's filter.
///
/// - No `filter` on the rule: always passes.
/// - A `filter` without a `name` list: passes.
/// - A `name` list: passes iff the display name contains at least one of the
///   listed substrings, case-insensitively. An empty list matches nothing.
///
/// Distance gating is the orchestrator's job; by the time a feature reaches
/// this function it is already within the rule's distance threshold.
pub fn passes_filter(display_name: &str, rule: &WaypointRule) -> bool {
    let Some(filter) = &rule.filter else {
        return true;
    };
    let Some(names) = &filter.name else {
        return true;
    };

    let lower = display_name.to_lowercase();
    names.iter().any(|n| lower.contains(&n.to_lowercase()))
}
