//! On-disk cache of pre-filter query results.
//!
//! A fresh run stores the full matched feature set together with the identity
//! of the run that produced it (source track path + config). A later run with
//! `--use-cache` restores that set and skips the network entirely; restored
//! features are indistinguishable from fresh query results. A cache written
//! for a different track or config is refused rather than silently reused.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, WaypointError};
use crate::pipeline::MatchedFeature;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    /// Path of the track the features were collected for.
    source: String,
    /// Config at collection time.
    config: Config,
    features: Vec<MatchedFeature>,
}

/// Persists and restores the matched feature set for one cache file path.
#[derive(Debug, Clone)]
pub struct QueryCache {
    path: PathBuf,
}

impl QueryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the feature set for a given track source and config.
    pub fn store(&self, source: &Path, config: &Config, features: &[MatchedFeature]) -> Result<()> {
        let payload = CacheFile {
            source: source.display().to_string(),
            config: config.clone(),
            features: features.to_vec(),
        };
        let file = File::create(&self.path)?;
        serde_json::to_writer(BufWriter::new(file), &payload)?;
        info!(
            "cached {} features to {}",
            payload.features.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Restore the feature set, refusing a cache built from a different track
    /// or config.
    pub fn load(&self, source: &Path, config: &Config) -> Result<Vec<MatchedFeature>> {
        let file = File::open(&self.path)?;
        let payload: CacheFile = serde_json::from_reader(BufReader::new(file))?;

        if payload.source != source.display().to_string() || payload.config != *config {
            return Err(WaypointError::CacheMismatch {
                path: self.path.clone(),
            });
        }

        info!(
            "loaded {} cached features from {}",
            payload.features.len(),
            self.path.display()
        );
        Ok(payload.features)
    }
}
