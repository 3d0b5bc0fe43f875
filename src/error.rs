//! Crate error type
//!
//! Every failure is a deterministic function of the input: nothing here is
//! transient and nothing is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("coordinate out of range: lat {lat}, lon {lon} (expected lat in [-90, 90], lon in [-180, 180])")]
    InvalidCoordinate { lat: f32, lon: f32 },

    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("arc height must be non-negative, got {0}")]
    InvalidArcHeight(f32),

    #[error("flight duration must be positive, got {0}s")]
    InvalidDuration(f64),

    #[error("trail lifespan must be positive, got {0}s")]
    InvalidLifespan(f64),

    #[error("trail spawn interval must be positive, got {0}s")]
    InvalidTrailInterval(f64),

    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("live projectile limit of {limit} reached")]
    AtCapacity { limit: usize },

    #[error("projectile id space exhausted")]
    IdsExhausted,

    #[error("degenerate arc geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by invalid construction parameters
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidCoordinate { .. }
                | Error::InvalidRadius(_)
                | Error::InvalidArcHeight(_)
                | Error::InvalidDuration(_)
                | Error::InvalidLifespan(_)
                | Error::InvalidTrailInterval(_)
                | Error::InvalidColor(_)
                | Error::AtCapacity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject anything that is not a finite, strictly positive number of seconds
pub(crate) fn positive_seconds(value: f64, err: fn(f64) -> Error) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}
