//! Error types for loading configuration and resolving scenes

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a JSON config (tuning or scene layout)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A scene layout that cannot back a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("scene is missing required node `{0}`")]
    MissingNode(&'static str),
    #[error("scene has more than one `{0}` node")]
    DuplicateNode(&'static str),
    #[error("node `{0}` has the wrong kind")]
    WrongKind(&'static str),
    #[error("scroll layer has no tiles")]
    EmptyScrollLayer,
    #[error("scroll layer tiles cannot cover the screen while one is off to the left")]
    ScrollLayerTooNarrow,
    #[error("obstacle template has no colliders")]
    EmptyObstacleTemplate,
    #[error("obstacle template has no goal collider")]
    MissingGoal,
}
