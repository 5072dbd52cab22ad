/*
 * Error Module
 *
 * The simulation step itself cannot fail. Errors only come from building a
 * flock out of inconsistent raw state, from invalid parameters, and from
 * loading parameter files.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlockError {
    // Position and velocity stores must describe the same agents
    #[error("position/velocity length mismatch: {positions} positions, {velocities} velocities")]
    LengthMismatch { positions: usize, velocities: usize },

    #[error("invalid simulation parameters: {0}")]
    InvalidParams(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed parameter file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("this build has no viewer; rebuild with `--features viewer` or pass --headless")]
    ViewerUnavailable,
}

pub type FlockResult<T> = Result<T, FlockError>;
