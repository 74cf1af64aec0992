//! Rule configuration: what to query, how far away a feature may be, and how
//! to mark it in the output.
//!
//! The config file is JSON:
//!
//! ```json
//! {
//!   "points": [
//!     {
//!       "tag": "natural",
//!       "value": "spring",
//!       "min_distance": 0.5,
//!       "marker": "Water Source",
//!       "filter": { "name": ["quelle", "brunnen"] }
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Optional per-rule feature filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFilter {
    /// Substrings of which at least one must occur (case-insensitively) in
    /// the feature's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
}

/// One configured tag/value rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRule {
    /// OSM tag key, e.g. `natural`.
    pub tag: String,
    /// OSM tag value, e.g. `spring`.
    pub value: String,
    /// Maximum distance from the track in kilometers.
    pub min_distance: f64,
    /// Waypoint `<type>` marker in the output GPX.
    pub marker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RuleFilter>,
}

/// The full rule configuration, immutable for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ordered rule list; output summary follows this order.
    pub points: Vec<WaypointRule>,
}

impl Config {
    /// Load the configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Build the (tag, value) dispatch table for this configuration.
    pub fn rule_table(&self) -> RuleTable<'_> {
        RuleTable::new(&self.points)
    }
}

/// (tag, value) → rule lookup, built once per run.
///
/// Replaces scanning the rule list per feature tag: the set of configured tag
/// keys and the exact (tag, value) pairs are materialized up front.
#[derive(Debug)]
pub struct RuleTable<'a> {
    used_tags: HashSet<&'a str>,
    rules: HashMap<(&'a str, &'a str), &'a WaypointRule>,
}

impl<'a> RuleTable<'a> {
    /// Build the table. On duplicate (tag, value) pairs the first rule wins.
    pub fn new(rules: &'a [WaypointRule]) -> Self {
        let mut used_tags = HashSet::new();
        let mut map = HashMap::new();
        for rule in rules {
            used_tags.insert(rule.tag.as_str());
            map.entry((rule.tag.as_str(), rule.value.as_str()))
                .or_insert(rule);
        }
        Self {
            used_tags,
            rules: map,
        }
    }

    /// Match a feature's tags against the configured rules.
    ///
    /// The first feature tag (in sorted key order) whose key is a configured
    /// tag decides the outcome: its value either maps to a rule or the
    /// feature is dropped. Later tags are not consulted, even if they would
    /// match another rule.
    pub fn match_tags(&self, tags: &BTreeMap<String, String>) -> Option<&'a WaypointRule> {
        for (key, value) in tags {
            if self.used_tags.contains(key.as_str()) {
                return self.rules.get(&(key.as_str(), value.as_str())).copied();
            }
        }
        None
    }
}
