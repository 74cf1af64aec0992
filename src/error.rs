//! Unified error handling for the waypoint pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WaypointError>;

/// All errors the pipeline can surface.
#[derive(Debug, Error)]
pub enum WaypointError {
    /// A geometry function was handed zero points.
    #[error("empty point sequence: {context}")]
    EmptyPointSequence { context: &'static str },

    /// The input GPX contained no track points at all.
    #[error("no track points found in {path}")]
    EmptyTrack { path: PathBuf },

    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A query to the Overpass collaborator failed; the run aborts.
    #[error("Overpass request failed: {0}")]
    Overpass(#[from] reqwest::Error),

    /// The cache on disk was produced by a different track or config.
    #[error("cache file {path} was built from a different track or config")]
    CacheMismatch { path: PathBuf },
}

/// Extension trait for converting `Option` into empty-input errors.
pub trait OptionExt<T> {
    /// Convert `None` into [`WaypointError::EmptyPointSequence`].
    fn ok_or_empty(self, context: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_empty(self, context: &'static str) -> Result<T> {
        self.ok_or(WaypointError::EmptyPointSequence { context })
    }
}
